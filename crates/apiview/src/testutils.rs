//! Builders for hand-made rustdoc documents used in unit tests.

use std::collections::BTreeMap;

use jsondoc::{
    Crate, GenericBound, GenericParamDef, GenericParamDefKind, Id, Item, ItemEnum, ItemKind,
    ItemSummary, JsonDoc, Module, Path, TraitBoundModifier, Type, Visibility,
};

use crate::options::RenderOptions;
use crate::render::RenderingContext;

pub const ROOT: Id = Id(0);

pub fn primitive(name: &str) -> Type {
    Type::Primitive(name.to_string())
}

pub fn generic(name: &str) -> Type {
    Type::Generic(name.to_string())
}

pub fn path(name: &str, id: u32) -> Path {
    Path {
        path: name.to_string(),
        id: Id(id),
        args: None,
    }
}

pub fn resolved(name: &str, id: u32) -> Type {
    Type::ResolvedPath(path(name, id))
}

pub fn trait_bound(name: &str, id: u32) -> GenericBound {
    GenericBound::TraitBound {
        trait_: path(name, id),
        generic_params: vec![],
        modifier: TraitBoundModifier::None,
    }
}

pub fn type_param(name: &str, bounds: Vec<GenericBound>) -> GenericParamDef {
    GenericParamDef {
        name: name.to_string(),
        kind: GenericParamDefKind::Type {
            bounds,
            default: None,
            is_synthetic: false,
        },
    }
}

pub fn lifetime_param(name: &str) -> GenericParamDef {
    GenericParamDef {
        name: name.to_string(),
        kind: GenericParamDefKind::Lifetime { outlives: vec![] },
    }
}

pub fn item(id: u32, name: Option<&str>, inner: ItemEnum) -> Item {
    Item {
        id: Id(id),
        crate_id: 0,
        name: name.map(str::to_string),
        visibility: Visibility::Public,
        docs: None,
        attrs: vec![],
        deprecation: None,
        inner,
    }
}

pub fn module(id: u32, name: &str, items: &[u32]) -> Item {
    item(
        id,
        Some(name),
        ItemEnum::Module(Module {
            is_crate: id == ROOT.0,
            items: items.iter().copied().map(Id).collect(),
            is_stripped: false,
        }),
    )
}

pub fn summary(kind: ItemKind, segments: &[&str]) -> ItemSummary {
    ItemSummary {
        crate_id: 1,
        path: segments.iter().map(|s| s.to_string()).collect(),
        kind,
    }
}

/// A document whose root module `demo` lists `root_items`.
pub fn doc(
    root_items: &[u32],
    items: Vec<Item>,
    paths: Vec<(u32, ItemSummary)>,
) -> JsonDoc {
    let mut index: BTreeMap<Id, Item> = items.into_iter().map(|i| (i.id, i)).collect();
    index.insert(ROOT, module(ROOT.0, "demo", root_items));
    JsonDoc::from_crate(Crate {
        root: ROOT,
        crate_version: Some("0.1.0".to_string()),
        includes_private: false,
        index,
        paths: paths.into_iter().map(|(id, s)| (Id(id), s)).collect(),
        format_version: 56,
    })
    .unwrap()
}

pub fn empty_doc() -> JsonDoc {
    doc(&[], vec![], vec![])
}

/// Run `f` with a rendering context over `doc` using default options.
pub fn with_context<R>(doc: &JsonDoc, f: impl FnOnce(&RenderingContext<'_>) -> R) -> R {
    let options = RenderOptions::default();
    f(&RenderingContext::new(doc, &options))
}
