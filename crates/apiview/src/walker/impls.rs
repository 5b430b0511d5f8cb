use apiview_fmt::{Output, ReviewLine};
use jsondoc::{Impl, ImplKind, Item, ItemEnum, ItemExt, Path};

use super::{ApiRenderer, block};
use crate::render::write_separated;
use crate::sort::sort_children;

impl<'c> ApiRenderer<'c> {
    /// Impls attached to a type, leaving out compiler-synthesized auto trait impls.
    ///
    /// A trait lists its implementors rather than its own impls, so traits have none.
    fn impls_of(&self, item: &'c Item) -> Vec<(ImplKind, &'c Item, &'c Impl)> {
        if matches!(item.inner, ItemEnum::Trait(_)) {
            return vec![];
        }
        let doc = self.ctx.doc;
        item.impls()
            .unwrap_or_default()
            .iter()
            .filter_map(|id| doc.get(id))
            .filter_map(|impl_item| match &impl_item.inner {
                ItemEnum::Impl(impl_) if !impl_.is_synthetic => {
                    Some((ImplKind::of(impl_item)?, impl_item, impl_))
                }
                _ => None,
            })
            .collect()
    }

    /// `#[derive(Clone, Debug)]` for the derived impls of a type.
    pub(super) fn derive_line(&self, item: &'c Item, line_id: &str) -> Option<ReviewLine> {
        let mut derived: Vec<&Path> = self
            .impls_of(item)
            .into_iter()
            .filter(|(kind, ..)| *kind == ImplKind::AutoDerived)
            .filter_map(|(_, _, impl_)| impl_.trait_.as_ref())
            .collect();
        if derived.is_empty() {
            return None;
        }
        derived.sort_by(|a, b| a.short_name().cmp(b.short_name()));
        derived.dedup_by(|a, b| a.short_name() == b.short_name());

        let mut out = Output::new();
        out.punct("#[").keyword("derive").punct("(");
        write_separated(&mut out, derived, Output::comma, |out, path| {
            out.type_name(path.short_name()).navigate_to(path.id);
        });
        out.punct(")]");
        Some(ReviewLine::new(None, out.into_tokens()).related_to(line_id))
    }

    /// Inherent impl blocks, then hand-written trait impls ordered by trait name.
    pub(super) fn impl_lines(&mut self, item: &'c Item, line_id: &str) -> Vec<ReviewLine> {
        let mut blocks: Vec<_> = self
            .impls_of(item)
            .into_iter()
            .filter(|(kind, ..)| kind.is_rendered_as_block())
            .collect();
        blocks.sort_by_cached_key(|(kind, impl_item, impl_)| {
            let trait_name = impl_.trait_.as_ref().map(|t| t.short_name().to_lowercase());
            (*kind != ImplKind::Inherent, trait_name, impl_item.id)
        });

        let mut lines = Vec::new();
        for (_, impl_item, impl_) in blocks {
            let id_base = match &impl_.trait_ {
                Some(trait_) => format!("{line_id}.impl.{}", trait_.short_name()),
                None => format!("{line_id}.impl"),
            };
            lines.extend(self.render_item(impl_item, id_base));
        }
        lines
    }

    /// `unsafe impl<T> !Trait for Type<T> where .. { .. }`
    pub(super) fn impl_block(&mut self, impl_: &'c Impl, line_id: String) -> Vec<ReviewLine> {
        let ctx = self.ctx;
        let mut out = Output::new();
        if impl_.is_unsafe {
            out.keyword("unsafe").space();
        }
        out.keyword("impl");
        ctx.write_generic_params(&mut out, &impl_.generics.params, 0);
        out.space();
        if let Some(trait_) = &impl_.trait_ {
            if impl_.is_negative {
                out.punct("!");
            }
            ctx.write_path(&mut out, trait_, 0);
            out.space().keyword("for").space();
        }
        ctx.write_type(&mut out, &impl_.for_, 0);
        ctx.write_where_clause(&mut out, &impl_.generics.where_predicates, 0);

        let members = sort_children(ctx.doc, &impl_.items).non_module;
        let children = self.member_lines(members, &line_id);
        block(line_id, out, children, None)
    }
}
