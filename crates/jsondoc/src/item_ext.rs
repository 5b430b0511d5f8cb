use crate::item_kind::ItemKind;
use crate::types::{Id, Item, ItemEnum, MacroKind};

/// Extension trait for [`Item`] providing utility methods.
pub trait ItemExt {
    /// The kind of this item, or `None` for payloads this model does not know.
    fn kind(&self) -> Option<ItemKind>;

    /// The name used to order this item among its siblings.
    ///
    /// A `use` item sorts by the path it imports, not by its local name.
    fn sort_name(&self) -> &str;

    /// Returns the impls for this item if applicable.
    fn impls(&self) -> Option<&[Id]>;
}

impl ItemExt for Item {
    fn kind(&self) -> Option<ItemKind> {
        Some(match &self.inner {
            ItemEnum::Module(_) => ItemKind::Module,
            ItemEnum::ExternCrate { .. } => ItemKind::ExternCrate,
            ItemEnum::Use(_) => ItemKind::Use,
            ItemEnum::Union(_) => ItemKind::Union,
            ItemEnum::Struct(_) => ItemKind::Struct,
            ItemEnum::StructField(_) => ItemKind::StructField,
            ItemEnum::Enum(_) => ItemKind::Enum,
            ItemEnum::Variant(_) => ItemKind::Variant,
            ItemEnum::Function(_) => ItemKind::Function,
            ItemEnum::Trait(_) => ItemKind::Trait,
            ItemEnum::TraitAlias { .. } => ItemKind::TraitAlias,
            ItemEnum::Impl(_) => ItemKind::Impl,
            ItemEnum::TypeAlias(_) => ItemKind::TypeAlias,
            ItemEnum::Constant { .. } => ItemKind::Constant,
            ItemEnum::Static(_) => ItemKind::Static,
            ItemEnum::ExternType => ItemKind::ExternType,
            ItemEnum::Macro(_) => ItemKind::Macro,
            ItemEnum::ProcMacro(proc_macro) => match proc_macro.kind {
                MacroKind::Bang => ItemKind::Macro,
                MacroKind::Attr => ItemKind::ProcAttribute,
                MacroKind::Derive => ItemKind::ProcDerive,
            },
            ItemEnum::Primitive(_) => ItemKind::Primitive,
            ItemEnum::AssocConst { .. } => ItemKind::AssocConst,
            ItemEnum::AssocType { .. } => ItemKind::AssocType,
            ItemEnum::Unsupported(_) => return None,
        })
    }

    fn sort_name(&self) -> &str {
        match &self.inner {
            ItemEnum::Use(use_) => &use_.source,
            _ => self.name.as_deref().unwrap_or_default(),
        }
    }

    fn impls(&self) -> Option<&[Id]> {
        match &self.inner {
            ItemEnum::Union(u) => Some(&u.impls),
            ItemEnum::Struct(s) => Some(&s.impls),
            ItemEnum::Enum(e) => Some(&e.impls),
            ItemEnum::Primitive(p) => Some(&p.impls),
            ItemEnum::Trait(t) => Some(&t.implementations),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Use, Visibility};

    fn item(name: Option<&str>, inner: ItemEnum) -> Item {
        Item {
            id: Id(1),
            crate_id: 0,
            name: name.map(str::to_string),
            visibility: Visibility::Public,
            docs: None,
            attrs: vec![],
            deprecation: None,
            inner,
        }
    }

    #[test]
    fn use_items_sort_by_source() {
        let use_ = item(
            None,
            ItemEnum::Use(Use {
                source: "std::fmt::Display".to_string(),
                name: "Show".to_string(),
                id: None,
                is_glob: false,
            }),
        );
        assert_eq!(use_.kind(), Some(ItemKind::Use));
        assert_eq!(use_.sort_name(), "std::fmt::Display");
    }

    #[test]
    fn unknown_payload_has_no_kind() {
        let unknown = item(Some("x"), ItemEnum::Unsupported(serde_json::json!({"new": 1})));
        assert_eq!(unknown.kind(), None);
        assert_eq!(unknown.sort_name(), "x");
        assert!(unknown.impls().is_none());
    }
}
