//! Token renderers for types, generics and signatures.
//!
//! All renderers are methods on [`RenderingContext`] that append to an
//! [`Output`] and thread an explicit nesting depth, so a pathological or
//! cyclic type degrades to an `unknown` token instead of overflowing the stack.

mod function;
mod generics;
mod lifetime;
mod reexport;
mod types;

use apiview_fmt::Output;
use jsondoc::{JsonDoc, Visibility};
use tracing::warn;

use crate::options::RenderOptions;

pub use lifetime::should_elide;
pub use reexport::{ReexportLines, sort_reexport_lines};

/// Placeholder emitted for shapes that cannot be rendered.
pub(crate) const UNKNOWN: &str = "unknown";

/// When we render an item, it might contain references to other parts of the
/// public API. For such cases, the rendering code can use the fields in this
/// struct.
#[derive(Clone, Copy)]
pub struct RenderingContext<'c> {
    /// The deserialized rustdoc JSON.
    pub doc: &'c JsonDoc,
    pub options: &'c RenderOptions,
}

impl<'c> RenderingContext<'c> {
    pub fn new(doc: &'c JsonDoc, options: &'c RenderOptions) -> Self {
        Self { doc, options }
    }

    /// Emits `unknown` and returns true once `depth` is past the configured limit.
    fn depth_exceeded(&self, out: &mut Output, depth: usize) -> bool {
        if depth <= self.options.max_depth {
            return false;
        }
        warn!(
            depth,
            max_depth = self.options.max_depth,
            "type nesting depth limit"
        );
        out.text(UNKNOWN);
        true
    }

    /// Writes `pub `, `pub(crate) ` or `pub(in path) `. Inherited visibility writes nothing.
    pub(crate) fn write_visibility(&self, out: &mut Output, visibility: &Visibility) {
        match visibility {
            Visibility::Public => {
                out.keyword_pub();
            }
            Visibility::Crate => {
                out.keyword("pub").punct("(").keyword("crate").punct(")").space();
            }
            Visibility::Restricted { path, .. } => {
                out.keyword("pub")
                    .punct("(")
                    .keyword("in")
                    .space()
                    .text(path)
                    .punct(")")
                    .space();
            }
            Visibility::Default => {}
        }
    }
}

/// Write every item of `items`, with `separator` strictly between two of them.
pub(crate) fn write_separated<I, F>(
    out: &mut Output,
    items: I,
    separator: impl Fn(&mut Output) -> &mut Output,
    mut write: F,
) where
    I: IntoIterator,
    F: FnMut(&mut Output, I::Item),
{
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            separator(out);
        }
        write(out, item);
    }
}

/// Rewrites a leading `crate::` or `$crate::` to the crate's own name.
pub(crate) fn replace_crate_path(path: &str, crate_name: &str) -> String {
    ["$crate::", "crate::"]
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix))
        .map_or_else(|| path.to_string(), |rest| format!("{crate_name}::{rest}"))
}
