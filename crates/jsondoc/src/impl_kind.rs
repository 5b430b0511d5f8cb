use crate::types::{Impl, Item, ItemEnum};

/// Attribute rustdoc records on impls generated by `#[derive]`.
const AUTOMATICALLY_DERIVED: &str = "#[automatically_derived]";

/// How an `impl` block came to exist, used to group impl blocks when rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImplKind {
    /// `impl Foo { .. }`
    Inherent,
    /// `impl Trait for Foo { .. }` written by hand.
    ManualTrait,
    /// `impl Trait for Foo` generated by `#[derive(Trait)]`.
    AutoDerived,
    /// `impl<T: Bound> Trait for T`, listed on every type that matches.
    Blanket,
}

impl ImplKind {
    /// Classify an impl. Returns `None` if `item` is not an impl.
    pub fn of(item: &Item) -> Option<Self> {
        let ItemEnum::Impl(impl_) = &item.inner else {
            return None;
        };
        Some(if is_inherent_impl(impl_) {
            Self::Inherent
        } else if is_auto_derived_impl(item, impl_) {
            Self::AutoDerived
        } else if is_manual_trait_impl(item, impl_) {
            Self::ManualTrait
        } else {
            Self::Blanket
        })
    }

    /// Whether impls of this kind are rendered as blocks of their own.
    pub fn is_rendered_as_block(self) -> bool {
        matches!(self, Self::Inherent | Self::ManualTrait)
    }
}

pub fn is_inherent_impl(impl_: &Impl) -> bool {
    impl_.blanket_impl.is_none() && impl_.trait_.is_none()
}

pub fn is_manual_trait_impl(item: &Item, impl_: &Impl) -> bool {
    impl_.blanket_impl.is_none() && impl_.trait_.is_some() && !is_automatically_derived(item)
}

pub fn is_auto_derived_impl(item: &Item, impl_: &Impl) -> bool {
    impl_.blanket_impl.is_none() && impl_.trait_.is_some() && is_automatically_derived(item)
}

fn is_automatically_derived(item: &Item) -> bool {
    item.attrs.iter().any(|attr| attr == AUTOMATICALLY_DERIVED)
}
