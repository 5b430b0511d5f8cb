use apiview_fmt::{Output, ReviewLine};
use jsondoc::{Id, ItemKind};
use tracing::debug;

use super::RenderingContext;

/// Render class of the path token in a re-export line.
pub const REEXPORT_CLASS: &str = "reexport";

/// Lines standing in for an item that is defined in another crate.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReexportLines {
    pub items: Vec<ReviewLine>,
    /// Module re-exports, which render in the module section rather than among items.
    pub modules: Vec<ReviewLine>,
}

impl ReexportLines {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.modules.is_empty()
    }
}

impl RenderingContext<'_> {
    /// Build the placeholder line for a foreign item from its path summary.
    ///
    /// A foreign module renders as `pub module a::b {}`: its children are not
    /// part of this document, so the body is always empty. Any other kind
    /// renders as `pub <kind> a::b`.
    pub fn resolve_reexport(&self, id: &Id) -> ReexportLines {
        let mut lines = ReexportLines::default();
        let Some(summary) = self.doc.summary(id) else {
            debug!(%id, "no path summary for re-exported item");
            return lines;
        };
        if summary.path.is_empty() {
            debug!(%id, "empty path for re-exported item");
            return lines;
        }

        let path = summary.path.join("::");
        let mut out = Output::new();
        out.keyword_pub()
            .keyword(summary.kind.as_str())
            .space()
            .type_name(&path)
            .navigate_to(id)
            .render_class(REEXPORT_CLASS);

        if summary.kind == ItemKind::Module {
            out.space().punct("{}");
            lines
                .modules
                .push(ReviewLine::new(Some(path), out.into_tokens()));
        } else {
            lines
                .items
                .push(ReviewLine::new(Some(path), out.into_tokens()));
        }
        lines
    }
}

/// Order re-export lines by kind priority, then by path case-insensitively.
///
/// The key is read back from the rendered tokens (`pub`, kind, path), so lines
/// from several resolver calls can be merged into one listing.
pub fn sort_reexport_lines(lines: &mut [ReviewLine]) {
    lines.sort_by_cached_key(|line| {
        let value = |index: usize| line.tokens.get(index).map_or("", |t| t.value.as_str());
        let priority = value(1)
            .parse::<ItemKind>()
            .map_or(usize::MAX, ItemKind::priority);
        let path = value(2);
        (priority, path.to_lowercase(), path.to_string())
    });
}
