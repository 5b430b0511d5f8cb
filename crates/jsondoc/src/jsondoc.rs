use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::compat;
use crate::error::{Error, Result};
use crate::types::{Crate, Id, Item, ItemEnum, ItemSummary};

/// Format versions whose field names this model has been checked against.
/// Documents outside the range are still read, on a best-effort basis.
const KNOWN_FORMAT_VERSIONS: RangeInclusive<u32> = 24..=57;

/// JSON documentation for a Rust crate.
///
/// Owns the rustdoc [`Crate`] data and serves read-only lookups by [`Id`]:
/// local items through [`JsonDoc::get`], and items from any crate (including
/// foreign ones reached through re-exports) through [`JsonDoc::summary`].
#[derive(Debug)]
pub struct JsonDoc {
    crate_data: Crate,
}

impl JsonDoc {
    /// Parse a rustdoc JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut value: Value = serde_json::from_str(json)?;
        compat::normalize_string_ids(&mut value);
        let crate_data: Crate = serde_json::from_value(value)?;
        Self::from_crate(crate_data)
    }

    /// Wrap already deserialized crate data, checking that it has a root module.
    pub fn from_crate(crate_data: Crate) -> Result<Self> {
        let root = crate_data.root;
        match crate_data.index.get(&root) {
            None => return Err(Error::MissingRoot(root)),
            Some(Item {
                inner: ItemEnum::Module(_),
                ..
            }) => {}
            Some(_) => return Err(Error::RootNotModule(root)),
        }

        if !KNOWN_FORMAT_VERSIONS.contains(&crate_data.format_version) {
            warn!(
                format_version = crate_data.format_version,
                "rustdoc JSON format version outside the known range, output may be incomplete"
            );
        }

        let doc = Self { crate_data };
        info!(
            crate_name = doc.crate_name(),
            format_version = doc.format_version(),
            items = doc.crate_data.index.len(),
            paths = doc.crate_data.paths.len(),
            "loaded rustdoc JSON"
        );
        Ok(doc)
    }

    /// Look up a local item. Dangling ids yield `None`.
    pub fn get(&self, id: &Id) -> Option<&Item> {
        let item = self.crate_data.index.get(id);
        if item.is_none() {
            debug!(%id, "id not found in index");
        }
        item
    }

    /// Look up the path summary of an item, local or foreign.
    pub fn summary(&self, id: &Id) -> Option<&ItemSummary> {
        self.crate_data.paths.get(id)
    }

    /// Whether `id` belongs to the documented crate.
    pub fn is_local(&self, id: &Id) -> bool {
        self.crate_data.index.contains_key(id)
    }

    /// Returns the crate root module ID.
    pub fn root_id(&self) -> Id {
        self.crate_data.root
    }

    /// The root module item.
    pub fn root(&self) -> &Item {
        // Presence and kind of the root are checked in `from_crate`.
        &self.crate_data.index[&self.crate_data.root]
    }

    pub fn crate_name(&self) -> &str {
        self.root().name.as_deref().unwrap_or_default()
    }

    pub fn crate_version(&self) -> Option<&str> {
        self.crate_data.crate_version.as_deref()
    }

    pub fn format_version(&self) -> u32 {
        self.crate_data.format_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "root": 0,
        "crate_version": "1.2.3",
        "format_version": 56,
        "index": {
            "0": {
                "id": 0,
                "name": "demo",
                "visibility": "public",
                "attrs": [],
                "inner": {"module": {"is_crate": true, "items": [1], "is_stripped": false}}
            },
            "1": {
                "id": 1,
                "name": "Thing",
                "visibility": "public",
                "attrs": [],
                "inner": {"struct": {"kind": "unit", "generics": {"params": [], "where_predicates": []}, "impls": []}}
            }
        },
        "paths": {
            "1": {"crate_id": 0, "path": ["demo", "Thing"], "kind": "struct"},
            "7": {"crate_id": 3, "path": ["other", "Future"], "kind": "some_future_kind"}
        }
    }"#;

    #[test]
    fn loads_minimal_document() {
        let doc = JsonDoc::from_json(MINIMAL).unwrap();
        assert_eq!(doc.crate_name(), "demo");
        assert_eq!(doc.crate_version(), Some("1.2.3"));
        assert_eq!(doc.root_id(), Id(0));
        assert!(doc.get(&Id(1)).is_some());
        assert!(doc.get(&Id(99)).is_none());
        assert!(doc.is_local(&Id(1)));
    }

    #[test]
    fn unknown_path_kinds_are_dropped() {
        let doc = JsonDoc::from_json(MINIMAL).unwrap();
        assert!(doc.summary(&Id(1)).is_some());
        assert!(doc.summary(&Id(7)).is_none());
    }

    #[test]
    fn missing_root_is_an_error() {
        let err =
            JsonDoc::from_json(r#"{"root": 5, "index": {}, "paths": {}, "format_version": 56}"#)
                .unwrap_err();
        assert!(matches!(err, Error::MissingRoot(Id(5))));
        assert_eq!(err.to_string(), "root item 5 is missing from the index");
    }

    #[test]
    fn loads_document_with_string_ids() {
        let json = r#"{
            "root": "0:0:1",
            "format_version": 30,
            "index": {
                "0:0:1": {
                    "id": "0:0:1",
                    "name": "legacy",
                    "visibility": "public",
                    "attrs": [],
                    "inner": {"module": {"is_crate": true, "items": ["0:2:3"], "is_stripped": false}}
                },
                "0:2:3": {
                    "id": "0:2:3",
                    "name": null,
                    "visibility": "public",
                    "attrs": [],
                    "inner": {"import": {"source": "std::io::Read", "name": "Read", "id": "1:7:9", "glob": false}}
                }
            },
            "paths": {
                "1:7:9": {"crate_id": 1, "path": ["std", "io", "Read"], "kind": "trait"}
            }
        }"#;
        let doc = JsonDoc::from_json(json).unwrap();
        assert_eq!(doc.crate_name(), "legacy");
        assert_eq!(doc.root_id(), Id(0));

        let ItemEnum::Module(root) = &doc.root().inner else {
            panic!("root is not a module");
        };
        let use_item = doc.get(&root.items[0]).unwrap();
        assert_eq!(use_item.id, Id(1));
        let ItemEnum::Use(use_) = &use_item.inner else {
            panic!("expected a use item");
        };
        let target = use_.id.unwrap();
        assert!(!doc.is_local(&target));
        assert_eq!(doc.summary(&target).unwrap().path, ["std", "io", "Read"]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = JsonDoc::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn unknown_item_payload_is_kept() {
        let json = MINIMAL.replace(
            r#"{"struct": {"kind": "unit", "generics": {"params": [], "where_predicates": []}, "impls": []}}"#,
            r#"{"shiny_new_item": {"x": 1}}"#,
        );
        let doc = JsonDoc::from_json(&json).unwrap();
        assert!(matches!(
            doc.get(&Id(1)).map(|item| &item.inner),
            Some(ItemEnum::Unsupported(_))
        ));
    }
}
