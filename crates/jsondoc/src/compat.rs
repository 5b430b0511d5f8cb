//! Normalization of fields whose encoding changed between format versions.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{Id, ItemSummary};

/// Reads `attrs` either as source strings (older formats) or as structured
/// attributes (newer formats), producing `#[...]` text in both cases.
pub(crate) fn attrs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(attribute_text).collect())
}

fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if text.starts_with('#') => Some(text.clone()),
        Value::String(text) => Some(format!("#[{text}]")),
        Value::Object(map) if map.len() == 1 => {
            let (key, body) = map.iter().next()?;
            Some(structured_attribute(key, body))
        }
        other => {
            debug!(attribute = %other, "skipping attribute with unexpected shape");
            None
        }
    }
}

fn structured_attribute(key: &str, body: &Value) -> String {
    match (key, body) {
        ("other", Value::String(text)) => text.clone(),
        ("must_use", Value::Object(fields)) => match fields.get("reason") {
            Some(Value::String(reason)) => format!("#[must_use = {reason:?}]"),
            _ => "#[must_use]".to_string(),
        },
        ("export_name" | "link_section", Value::String(text)) => format!("#[{key} = {text:?}]"),
        ("repr", Value::Object(fields)) => repr_attribute(fields),
        ("target_feature", Value::Object(fields)) => {
            let features: Vec<String> = fields
                .get("enable")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .map(|feature| format!("enable = {feature:?}"))
                .collect();
            format!("#[target_feature({})]", features.join(", "))
        }
        _ => format!("#[{key}]"),
    }
}

fn repr_attribute(fields: &Map<String, Value>) -> String {
    let mut parts = vec![];
    match fields.get("kind").and_then(Value::as_str) {
        Some("rust") | None => {}
        Some("c") => parts.push("C".to_string()),
        Some(kind) => parts.push(kind.to_string()),
    }
    if let Some(align) = fields.get("align").filter(|v| !v.is_null()) {
        parts.push(format!("align({align})"));
    }
    if let Some(packed) = fields.get("packed").filter(|v| !v.is_null()) {
        parts.push(format!("packed({packed})"));
    }
    if let Some(int) = fields.get("int").and_then(Value::as_str) {
        parts.push(int.to_string());
    }
    format!("#[repr({})]", parts.join(", "))
}

/// Reads the `paths` table, dropping entries whose kind this model does not
/// know rather than rejecting the document.
pub(crate) fn lenient_paths<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Id, ItemSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<Id, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value(value) {
            Ok(summary) => Some((id, summary)),
            Err(err) => {
                debug!(%id, %err, "skipping unreadable path summary");
                None
            }
        })
        .collect())
}

/// Fields whose string values, or string array elements, are item ids.
const ID_FIELDS: [&str; 8] = [
    "root",
    "id",
    "items",
    "impls",
    "implementations",
    "variants",
    "fields",
    "tuple",
];

/// Tables keyed by item id.
const ID_TABLES: [&str; 2] = ["index", "paths"];

/// Rewrites string ids such as `"0:0:1"`, used by older format versions, to
/// integers so the document reads into the integer [`Id`] model.
///
/// Ids are numbered in sorted order of their string form, which keeps the
/// mapping deterministic for a given document. Returns false and leaves the
/// document untouched when it already uses integer ids.
pub(crate) fn normalize_string_ids(doc: &mut Value) -> bool {
    if !doc.get("root").is_some_and(Value::is_string) {
        return false;
    }

    let mut names = BTreeSet::new();
    visit_ids(doc, &mut |slot: &mut Value| {
        if let Value::String(id) = slot {
            names.insert(id.clone());
        }
    });
    for table in ID_TABLES {
        if let Some(Value::Object(map)) = doc.get(table) {
            names.extend(map.keys().cloned());
        }
    }
    let numbers: HashMap<String, u32> = names.into_iter().zip(0u32..).collect();

    visit_ids(doc, &mut |slot: &mut Value| {
        let number = match slot {
            Value::String(id) => numbers.get(id.as_str()).copied(),
            _ => None,
        };
        if let Some(number) = number {
            *slot = Value::from(number);
        }
    });
    for table in ID_TABLES {
        if let Some(Value::Object(map)) = doc.get_mut(table) {
            *map = std::mem::take(map)
                .into_iter()
                .map(|(key, value)| match numbers.get(&key) {
                    Some(number) => (number.to_string(), value),
                    None => (key, value),
                })
                .collect();
        }
    }
    debug!(ids = numbers.len(), "renumbered string ids");
    true
}

fn visit_ids(value: &mut Value, visit: &mut impl FnMut(&mut Value)) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if ID_FIELDS.contains(&key.as_str()) {
                    match child {
                        Value::String(_) => visit(child),
                        Value::Array(elements) => elements
                            .iter_mut()
                            .filter(|element| element.is_string())
                            .for_each(|element| visit(element)),
                        _ => {}
                    }
                } else if key == "links" {
                    if let Value::Object(links) = child {
                        links.values_mut().for_each(|target| visit(target));
                    }
                }
                visit_ids(child, visit);
            }
        }
        Value::Array(elements) => {
            for element in elements {
                visit_ids(element, visit);
            }
        }
        _ => {}
    }
}
