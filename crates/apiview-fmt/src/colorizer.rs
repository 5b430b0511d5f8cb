//! Terminal styling of tokens.

use colored::{ColoredString, Colorize};

use crate::tokens::{ReviewToken, TokenKind};

/// Maps token kinds to terminal colors.
///
/// A disabled colorizer returns token values untouched. An enabled one styles
/// them through `colored`, which still honours its global `control` override
/// and the `NO_COLOR`/`CLICOLOR` environment variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Style a single token value (without its suffix space).
    pub fn paint(&self, token: &ReviewToken) -> String {
        if self.enabled {
            self.style(token).to_string()
        } else {
            token.value.clone()
        }
    }

    fn style(&self, token: &ReviewToken) -> ColoredString {
        let value = token.value.as_str();
        if token.is_documentation {
            return value.bright_black().italic();
        }
        match token.kind {
            TokenKind::Keyword => value.magenta(),
            TokenKind::TypeName if token.navigate_to_id.is_some() => value.cyan().underline(),
            TokenKind::TypeName => value.cyan(),
            TokenKind::Comment => value.bright_black(),
            TokenKind::Punctuation | TokenKind::Text => value.normal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use colored::Color;

    use super::*;

    #[test]
    fn disabled_colorizer_returns_values() {
        let token = ReviewToken::new(TokenKind::Keyword, "impl");
        assert_eq!(Colorizer::plain().paint(&token), "impl");
    }

    #[test]
    fn styles_by_kind() {
        let colorizer = Colorizer::new(true);
        let keyword = ReviewToken::new(TokenKind::Keyword, "impl");
        let type_name = ReviewToken::new(TokenKind::TypeName, "Vec");
        let mut doc = ReviewToken::new(TokenKind::Comment, "/// hi");
        doc.is_documentation = true;
        assert_eq!(colorizer.style(&keyword).fgcolor, Some(Color::Magenta));
        assert_eq!(colorizer.style(&type_name).fgcolor, Some(Color::Cyan));
        assert_eq!(colorizer.style(&doc).fgcolor, Some(Color::BrightBlack));
    }
}
