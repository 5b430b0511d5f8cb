/// Default limit on type nesting before a subtree is rendered as `unknown`.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for one rendering pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `///` lines for item documentation.
    pub include_docs: bool,
    /// Maximum nesting of types, bounds and generic arguments.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_docs: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
