//! In-memory model of the rustdoc JSON format and a read-only index over it.
//!
//! Deserialization is tolerant of older format versions: historical field
//! names are accepted through serde aliases, structured attributes are folded
//! back into their `#[...]` source text, and shapes this model does not know
//! are kept as raw JSON in an `Unsupported` variant instead of failing the
//! whole document.

mod compat;
mod error;
mod impl_kind;
mod item_ext;
mod item_kind;
mod jsondoc;
mod types;

pub use error::{Error, Result};
pub use impl_kind::{ImplKind, is_auto_derived_impl, is_inherent_impl, is_manual_trait_impl};
pub use item_ext::ItemExt;
pub use item_kind::ItemKind;
pub use jsondoc::JsonDoc;
pub use types::*;
