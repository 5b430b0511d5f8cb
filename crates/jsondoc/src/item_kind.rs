use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of an item, as used in the `paths` table and for sibling ordering.
///
/// Variants are declared in sibling-ordering priority: items of an earlier
/// kind are listed before items of a later kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[serde(alias = "import")]
    Use,
    Struct,
    Enum,
    Trait,
    Function,
    #[serde(alias = "typedef")]
    TypeAlias,
    Constant,
    Static,
    #[serde(alias = "foreign_type")]
    ExternType,
    Impl,
    Union,
    TraitAlias,
    AssocConst,
    AssocType,
    Primitive,
    Keyword,
    ProcAttribute,
    ProcDerive,
    Variant,
    ExternCrate,
    StructField,
    Module,
    Macro,
}

impl ItemKind {
    pub const ALL: [ItemKind; 23] = [
        Self::Use,
        Self::Struct,
        Self::Enum,
        Self::Trait,
        Self::Function,
        Self::TypeAlias,
        Self::Constant,
        Self::Static,
        Self::ExternType,
        Self::Impl,
        Self::Union,
        Self::TraitAlias,
        Self::AssocConst,
        Self::AssocType,
        Self::Primitive,
        Self::Keyword,
        Self::ProcAttribute,
        Self::ProcDerive,
        Self::Variant,
        Self::ExternCrate,
        Self::StructField,
        Self::Module,
        Self::Macro,
    ];

    /// Position in the sibling ordering; lower sorts first.
    pub fn priority(self) -> usize {
        self as usize
    }

    /// The rustdoc spelling of this kind, e.g. `type_alias`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Use => "use",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Trait => "trait",
            Self::Function => "function",
            Self::TypeAlias => "type_alias",
            Self::Constant => "constant",
            Self::Static => "static",
            Self::ExternType => "extern_type",
            Self::Impl => "impl",
            Self::Union => "union",
            Self::TraitAlias => "trait_alias",
            Self::AssocConst => "assoc_const",
            Self::AssocType => "assoc_type",
            Self::Primitive => "primitive",
            Self::Keyword => "keyword",
            Self::ProcAttribute => "proc_attribute",
            Self::ProcDerive => "proc_derive",
            Self::Variant => "variant",
            Self::ExternCrate => "extern_crate",
            Self::StructField => "struct_field",
            Self::Module => "module",
            Self::Macro => "macro",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown item kind: {s}"))
    }
}
