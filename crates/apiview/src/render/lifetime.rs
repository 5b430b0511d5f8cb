/// Prefixes of lifetimes the compiler synthesizes rather than the author writing them:
/// `'life0`, `'life1`, ... from desugared `async fn`, and the anonymous `'_`.
const SYNTHESIZED_PREFIXES: [&str; 2] = ["'life", "'_"];

/// Whether a lifetime is compiler-synthesized noise that should not be rendered.
///
/// True for the synthesized prefixes above and for purely numeric names
/// (with or without the leading `'`).
pub fn should_elide(lifetime: &str) -> bool {
    if SYNTHESIZED_PREFIXES
        .iter()
        .any(|prefix| lifetime.starts_with(prefix))
    {
        return true;
    }
    let name = lifetime.strip_prefix('\'').unwrap_or(lifetime);
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::should_elide;

    #[test]
    fn synthesized_lifetimes_are_elided() {
        assert!(should_elide("'life0a"));
        assert!(should_elide("'life1"));
        assert!(should_elide("'_"));
        assert!(should_elide("3"));
        assert!(should_elide("'12"));
    }

    #[test]
    fn written_lifetimes_are_kept() {
        assert!(!should_elide("'a"));
        assert!(!should_elide("'static"));
        assert!(!should_elide("'lif"));
        assert!(!should_elide("'"));
        assert!(!should_elide(""));
    }
}
