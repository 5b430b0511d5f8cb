//! Serde model of the rustdoc JSON document.
//!
//! Every enum that rustdoc may grow in future format versions carries a
//! trailing `#[serde(untagged)] Unsupported` variant holding the raw JSON, so
//! a new shape degrades a single node instead of the whole document.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compat;
use crate::item_kind::ItemKind;

/// Identifier of an item inside one rustdoc JSON document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub u32);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The top level of a rustdoc JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crate {
    pub root: Id,
    #[serde(default)]
    pub crate_version: Option<String>,
    #[serde(default)]
    pub includes_private: bool,
    #[serde(default)]
    pub index: BTreeMap<Id, Item>,
    #[serde(default, deserialize_with = "compat::lenient_paths")]
    pub paths: BTreeMap<Id, ItemSummary>,
    #[serde(default)]
    pub format_version: u32,
}

/// Summary of an item that may live outside the documented crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    #[serde(default)]
    pub crate_id: u32,
    pub path: Vec<String>,
    pub kind: ItemKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    #[serde(default)]
    pub crate_id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub docs: Option<String>,
    /// Attributes as source text, e.g. `#[non_exhaustive]`.
    #[serde(default, deserialize_with = "compat::attrs")]
    pub attrs: Vec<String>,
    #[serde(default)]
    pub deprecation: Option<Deprecation>,
    pub inner: ItemEnum,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    Default,
    Crate,
    Restricted {
        parent: Id,
        path: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// The kind-specific payload of an [`Item`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEnum {
    Module(Module),
    ExternCrate {
        name: String,
        #[serde(default)]
        rename: Option<String>,
    },
    #[serde(alias = "import")]
    Use(Use),
    Union(Union),
    Struct(Struct),
    StructField(Type),
    Enum(Enum),
    Variant(Variant),
    Function(Function),
    Trait(Trait),
    TraitAlias {
        #[serde(default)]
        generics: Generics,
        #[serde(default)]
        params: Vec<GenericBound>,
    },
    Impl(Impl),
    #[serde(alias = "typedef")]
    TypeAlias(TypeAlias),
    Constant {
        #[serde(rename = "type")]
        type_: Type,
        #[serde(rename = "const")]
        const_: Constant,
    },
    Static(Static),
    #[serde(alias = "foreign_type")]
    ExternType,
    Macro(String),
    ProcMacro(ProcMacro),
    Primitive(Primitive),
    AssocConst {
        #[serde(rename = "type")]
        type_: Type,
        #[serde(default, alias = "default")]
        value: Option<String>,
    },
    AssocType {
        #[serde(default)]
        generics: Generics,
        #[serde(default)]
        bounds: Vec<GenericBound>,
        #[serde(rename = "type", alias = "default", default)]
        type_: Option<Type>,
    },
    #[serde(untagged)]
    Unsupported(Value),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub is_crate: bool,
    #[serde(default)]
    pub items: Vec<Id>,
    #[serde(default)]
    pub is_stripped: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Use {
    /// The full path being imported, e.g. `std::io::Read`.
    pub source: String,
    /// The name under which the item is visible.
    pub name: String,
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default, alias = "glob")]
    pub is_glob: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Union {
    #[serde(default)]
    pub generics: Generics,
    #[serde(default)]
    pub has_stripped_fields: bool,
    #[serde(default)]
    pub fields: Vec<Id>,
    #[serde(default)]
    pub impls: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    pub kind: StructKind,
    #[serde(default)]
    pub generics: Generics,
    #[serde(default)]
    pub impls: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    Unit,
    /// Stripped fields are `None`.
    Tuple(Vec<Option<Id>>),
    Plain {
        fields: Vec<Id>,
        #[serde(default, alias = "fields_stripped")]
        has_stripped_fields: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    #[serde(default)]
    pub generics: Generics,
    #[serde(default, alias = "variants_stripped")]
    pub has_stripped_variants: bool,
    #[serde(default)]
    pub variants: Vec<Id>,
    #[serde(default)]
    pub impls: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub kind: VariantKind,
    #[serde(default)]
    pub discriminant: Option<Discriminant>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Plain,
    Tuple(Vec<Option<Id>>),
    Struct {
        fields: Vec<Id>,
        #[serde(default, alias = "fields_stripped")]
        has_stripped_fields: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discriminant {
    pub expr: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Function {
    #[serde(alias = "decl")]
    pub sig: FunctionSignature,
    #[serde(default)]
    pub generics: Generics,
    #[serde(default)]
    pub header: FunctionHeader,
    #[serde(default)]
    pub has_body: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    #[serde(default)]
    pub is_auto: bool,
    #[serde(default)]
    pub is_unsafe: bool,
    #[serde(default = "default_true", alias = "is_object_safe")]
    pub is_dyn_compatible: bool,
    #[serde(default)]
    pub items: Vec<Id>,
    #[serde(default)]
    pub generics: Generics,
    #[serde(default)]
    pub bounds: Vec<GenericBound>,
    #[serde(default)]
    pub implementations: Vec<Id>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Impl {
    #[serde(default)]
    pub is_unsafe: bool,
    #[serde(default)]
    pub generics: Generics,
    #[serde(default)]
    pub provided_trait_methods: Vec<String>,
    #[serde(rename = "trait", default)]
    pub trait_: Option<Path>,
    #[serde(rename = "for")]
    pub for_: Type,
    #[serde(default)]
    pub items: Vec<Id>,
    #[serde(default, alias = "negative")]
    pub is_negative: bool,
    #[serde(default, alias = "synthetic")]
    pub is_synthetic: bool,
    #[serde(default)]
    pub blanket_impl: Option<Type>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    #[serde(rename = "type")]
    pub type_: Type,
    #[serde(default)]
    pub generics: Generics,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Static {
    #[serde(rename = "type")]
    pub type_: Type,
    #[serde(default, alias = "mutable")]
    pub is_mutable: bool,
    #[serde(default)]
    pub expr: String,
    #[serde(default)]
    pub is_unsafe: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcMacro {
    pub kind: MacroKind,
    #[serde(default)]
    pub helpers: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroKind {
    Bang,
    Attr,
    Derive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub name: String,
    #[serde(default)]
    pub impls: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constant {
    pub expr: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub is_literal: bool,
}

/// A type as written in a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// Structs, enums, unions and traits, e.g. `Vec<u8>`.
    ResolvedPath(Path),
    DynTrait(DynTrait),
    /// A generic parameter, e.g. `T`.
    Generic(String),
    /// A builtin type, e.g. `u32`.
    Primitive(String),
    FunctionPointer(Box<FunctionPointer>),
    Tuple(Vec<Type>),
    Slice(Box<Type>),
    Array {
        #[serde(rename = "type")]
        type_: Box<Type>,
        len: String,
    },
    /// A pattern type, e.g. `u32 is 1..`.
    Pat {
        #[serde(rename = "type")]
        type_: Box<Type>,
        #[serde(rename = "__pat_unstable_do_not_use", default)]
        pat: String,
    },
    ImplTrait(Vec<GenericBound>),
    /// `_`
    Infer,
    RawPointer {
        #[serde(alias = "mutable")]
        is_mutable: bool,
        #[serde(rename = "type")]
        type_: Box<Type>,
    },
    BorrowedRef {
        #[serde(default)]
        lifetime: Option<String>,
        #[serde(alias = "mutable")]
        is_mutable: bool,
        #[serde(rename = "type")]
        type_: Box<Type>,
    },
    /// An associated type projection, e.g. `<T as Iterator>::Item`.
    QualifiedPath {
        name: String,
        #[serde(default)]
        args: Option<Box<GenericArgs>>,
        self_type: Box<Type>,
        #[serde(rename = "trait", default)]
        trait_: Option<Path>,
    },
    #[serde(untagged)]
    Unsupported(Value),
}

/// A path to an item, possibly with generic arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// The path as written at the use site. Older format versions call it `name`.
    #[serde(alias = "name")]
    pub path: String,
    pub id: Id,
    #[serde(default)]
    pub args: Option<Box<GenericArgs>>,
}

impl Path {
    /// The last segment of the path, e.g. `Vec` for `std::vec::Vec`.
    pub fn short_name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DynTrait {
    pub traits: Vec<PolyTrait>,
    #[serde(default)]
    pub lifetime: Option<String>,
}

/// A trait with optional higher-ranked parameters, e.g. `for<'a> Fn(&'a u8)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyTrait {
    #[serde(rename = "trait")]
    pub trait_: Path,
    #[serde(default)]
    pub generic_params: Vec<GenericParamDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionPointer {
    #[serde(alias = "decl")]
    pub sig: FunctionSignature,
    #[serde(default)]
    pub generic_params: Vec<GenericParamDef>,
    #[serde(default)]
    pub header: FunctionHeader,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Parameter names paired with their types.
    #[serde(default)]
    pub inputs: Vec<(String, Type)>,
    #[serde(default)]
    pub output: Option<Type>,
    #[serde(default, alias = "c_variadic")]
    pub is_c_variadic: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionHeader {
    #[serde(default, alias = "const_")]
    pub is_const: bool,
    #[serde(default, alias = "unsafe_")]
    pub is_unsafe: bool,
    #[serde(default, alias = "async_")]
    pub is_async: bool,
    #[serde(default)]
    pub abi: Abi,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Abi {
    #[default]
    Rust,
    C {
        #[serde(default)]
        unwind: bool,
    },
    Cdecl {
        #[serde(default)]
        unwind: bool,
    },
    Stdcall {
        #[serde(default)]
        unwind: bool,
    },
    Fastcall {
        #[serde(default)]
        unwind: bool,
    },
    Aapcs {
        #[serde(default)]
        unwind: bool,
    },
    Win64 {
        #[serde(default)]
        unwind: bool,
    },
    #[serde(alias = "Sysv64")]
    SysV64 {
        #[serde(default)]
        unwind: bool,
    },
    System {
        #[serde(default)]
        unwind: bool,
    },
    Other(String),
}

impl Abi {
    /// The ABI string as written after `extern`, or `None` for the Rust ABI.
    pub fn name(&self) -> Option<Cow<'_, str>> {
        let (base, unwind) = match self {
            Self::Rust => return None,
            Self::Other(text) => return Some(Cow::Borrowed(text)),
            Self::C { unwind } => ("C", *unwind),
            Self::Cdecl { unwind } => ("cdecl", *unwind),
            Self::Stdcall { unwind } => ("stdcall", *unwind),
            Self::Fastcall { unwind } => ("fastcall", *unwind),
            Self::Aapcs { unwind } => ("aapcs", *unwind),
            Self::Win64 { unwind } => ("win64", *unwind),
            Self::SysV64 { unwind } => ("sysv64", *unwind),
            Self::System { unwind } => ("system", *unwind),
        };
        Some(if unwind {
            Cow::Owned(format!("{base}-unwind"))
        } else {
            Cow::Borrowed(base)
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Generics {
    #[serde(default)]
    pub params: Vec<GenericParamDef>,
    #[serde(default)]
    pub where_predicates: Vec<WherePredicate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenericParamDef {
    pub name: String,
    pub kind: GenericParamDefKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericParamDefKind {
    Lifetime {
        #[serde(default)]
        outlives: Vec<String>,
    },
    Type {
        #[serde(default)]
        bounds: Vec<GenericBound>,
        #[serde(default)]
        default: Option<Type>,
        /// Set for the parameters rustdoc invents for argument-position `impl Trait`.
        #[serde(default, alias = "synthetic")]
        is_synthetic: bool,
    },
    Const {
        #[serde(rename = "type")]
        type_: Type,
        #[serde(default)]
        default: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WherePredicate {
    BoundPredicate {
        #[serde(rename = "type")]
        type_: Type,
        #[serde(default)]
        bounds: Vec<GenericBound>,
        #[serde(default)]
        generic_params: Vec<GenericParamDef>,
    },
    LifetimePredicate {
        lifetime: String,
        #[serde(default)]
        outlives: Vec<String>,
    },
    EqPredicate {
        lhs: Type,
        rhs: Term,
    },
    #[serde(untagged)]
    Unsupported(Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericBound {
    TraitBound {
        #[serde(rename = "trait")]
        trait_: Path,
        #[serde(default)]
        generic_params: Vec<GenericParamDef>,
        #[serde(default)]
        modifier: TraitBoundModifier,
    },
    Outlives(String),
    /// `use<'a, T>` precise capturing.
    Use(Vec<PreciseCapturingArg>),
    #[serde(untagged)]
    Unsupported(Value),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitBoundModifier {
    #[default]
    None,
    /// `?Sized`
    Maybe,
    /// `~const Trait`
    MaybeConst,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreciseCapturingArg {
    Lifetime(String),
    Param(String),
    /// Older format versions list the captured names as bare strings.
    #[serde(untagged)]
    Name(String),
}

impl PreciseCapturingArg {
    pub fn name(&self) -> &str {
        match self {
            Self::Lifetime(name) | Self::Param(name) | Self::Name(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericArgs {
    /// `<'a, u32, Item = T>`
    AngleBracketed {
        #[serde(default)]
        args: Vec<GenericArg>,
        #[serde(default, alias = "bindings")]
        constraints: Vec<AssocItemConstraint>,
    },
    /// `Fn(A, B) -> C`
    Parenthesized {
        #[serde(default)]
        inputs: Vec<Type>,
        #[serde(default)]
        output: Option<Type>,
    },
    /// `T::method(..)`
    ReturnTypeNotation,
    #[serde(untagged)]
    Unsupported(Value),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericArg {
    Lifetime(String),
    Type(Type),
    Const(Constant),
    Infer,
}

/// `Item = T` or `Item: Bound` inside angle brackets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssocItemConstraint {
    pub name: String,
    #[serde(default)]
    pub args: Option<Box<GenericArgs>>,
    pub binding: AssocItemConstraintKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssocItemConstraintKind {
    Equality(Term),
    Constraint(Vec<GenericBound>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Type(Type),
    Constant(Constant),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accepts_legacy_name_field() {
        let current: Path =
            serde_json::from_str(r#"{"path": "Vec", "id": 3, "args": null}"#).unwrap();
        let legacy: Path = serde_json::from_str(r#"{"name": "Vec", "id": 3}"#).unwrap();
        assert_eq!(current, legacy);
        assert_eq!(legacy.path, "Vec");
    }

    #[test]
    fn short_name_takes_last_segment() {
        let path: Path =
            serde_json::from_str(r#"{"path": "std::vec::Vec", "id": 1}"#).unwrap();
        assert_eq!(path.short_name(), "Vec");
    }

    #[test]
    fn unknown_type_shape_is_kept_as_raw_json() {
        let ty: Type =
            serde_json::from_str(r#"{"unsafe_binder": {"type": {"primitive": "u8"}}}"#).unwrap();
        assert!(matches!(ty, Type::Unsupported(_)));
    }

    #[test]
    fn infer_is_a_bare_string() {
        let ty: Type = serde_json::from_str(r#""infer""#).unwrap();
        assert_eq!(ty, Type::Infer);
    }

    #[test]
    fn function_accepts_legacy_decl_and_header_spellings() {
        let function: Function = serde_json::from_str(
            r#"{
                "decl": {"inputs": [], "output": null, "c_variadic": true},
                "header": {"const_": true, "unsafe_": false, "async_": true, "abi": "Rust"}
            }"#,
        )
        .unwrap();
        assert!(function.sig.is_c_variadic);
        assert!(function.header.is_const);
        assert!(function.header.is_async);
        assert!(!function.has_body);
    }

    #[test]
    fn angle_bracketed_accepts_legacy_bindings() {
        let args: GenericArgs = serde_json::from_str(
            r#"{"angle_bracketed": {"args": [], "bindings": [
                {"name": "Item", "binding": {"equality": {"type": {"primitive": "u8"}}}}
            ]}}"#,
        )
        .unwrap();
        let GenericArgs::AngleBracketed { constraints, .. } = args else {
            panic!("expected angle bracketed args");
        };
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].name, "Item");
    }

    #[test]
    fn abi_names() {
        assert_eq!(Abi::Rust.name(), None);
        assert_eq!(Abi::C { unwind: false }.name().as_deref(), Some("C"));
        assert_eq!(Abi::C { unwind: true }.name().as_deref(), Some("C-unwind"));
        assert_eq!(
            Abi::Other("vectorcall".into()).name().as_deref(),
            Some("vectorcall")
        );
        let abi: Abi = serde_json::from_str(r#"{"SysV64": {"unwind": false}}"#).unwrap();
        assert_eq!(abi.name().as_deref(), Some("sysv64"));
    }

    #[test]
    fn synthetic_param_legacy_spelling() {
        let kind: GenericParamDefKind =
            serde_json::from_str(r#"{"type": {"bounds": [], "default": null, "synthetic": true}}"#)
                .unwrap();
        assert!(matches!(
            kind,
            GenericParamDefKind::Type {
                is_synthetic: true,
                ..
            }
        ));
    }

    #[test]
    fn precise_capturing_accepts_bare_names() {
        let bound: GenericBound = serde_json::from_str(r#"{"use": ["'a", "T"]}"#).unwrap();
        let GenericBound::Use(args) = bound else {
            panic!("expected use bound");
        };
        let names: Vec<_> = args.iter().map(PreciseCapturingArg::name).collect();
        assert_eq!(names, ["'a", "T"]);
    }
}
