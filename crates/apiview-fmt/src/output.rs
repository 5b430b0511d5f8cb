use crate::tokens::{ReviewToken, TokenKind};

/// A builder-style wrapper around `Vec<ReviewToken>` for ergonomic token construction.
///
/// Spacing is expressed through the suffix space flag of the preceding token,
/// set by [`Output::space`]. Only literal separators such as ` as ` carry
/// whitespace in their value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Output {
    tokens: Vec<ReviewToken>,
}

impl Output {
    /// Create a new empty output.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    fn push(&mut self, kind: TokenKind, text: impl Into<String>) -> &mut Self {
        self.tokens.push(ReviewToken::new(kind, text));
        self
    }

    /// Add a keyword token, like `pub`, `impl`, `where`, or `dyn`.
    pub fn keyword(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(TokenKind::Keyword, text)
    }

    /// Add a type name token, like the name of a struct, a trait or a generic.
    pub fn type_name(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(TokenKind::TypeName, text)
    }

    /// Add a text token, like a field name or a literal.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(TokenKind::Text, text)
    }

    /// Add a punctuation token, like `<` or `::`.
    pub fn punct(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(TokenKind::Punctuation, text)
    }

    /// Add a comment token.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(TokenKind::Comment, text)
    }

    /// Put a space after the last token. Does nothing on an empty output.
    pub fn space(&mut self) -> &mut Self {
        if let Some(last) = self.tokens.last_mut() {
            last.has_suffix_space = true;
        }
        self
    }

    /// Make the last token navigate to the item with the given id.
    pub fn navigate_to(&mut self, id: impl ToString) -> &mut Self {
        if let Some(last) = self.tokens.last_mut() {
            last.navigate_to_id = Some(id.to_string());
        }
        self
    }

    /// Tag the last token with a render class.
    pub fn render_class(&mut self, class: impl Into<String>) -> &mut Self {
        if let Some(last) = self.tokens.last_mut() {
            last.render_classes.push(class.into());
        }
        self
    }

    /// Mark every token as documentation.
    pub fn documentation(&mut self) -> &mut Self {
        for token in &mut self.tokens {
            token.is_documentation = true;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Convert this output into a vector of tokens.
    pub fn into_tokens(self) -> Vec<ReviewToken> {
        self.tokens
    }

    /// Get a reference to the underlying tokens.
    pub fn tokens(&self) -> &[ReviewToken] {
        &self.tokens
    }

    /// The token values, without spacing.
    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    // Convenience methods for common token sequences

    /// Add "pub " (keyword + space).
    pub fn keyword_pub(&mut self) -> &mut Self {
        self.keyword("pub").space()
    }

    /// Add " + " (space + punctuation + space).
    pub fn plus(&mut self) -> &mut Self {
        self.space().punct("+").space()
    }

    /// Add ": " (punctuation + space).
    pub fn colon(&mut self) -> &mut Self {
        self.punct(":").space()
    }

    /// Add ", " (punctuation + space).
    pub fn comma(&mut self) -> &mut Self {
        self.punct(",").space()
    }

    /// Add " = " (space + punctuation + space).
    pub fn equals(&mut self) -> &mut Self {
        self.space().punct("=").space()
    }

    /// Add " -> " (space + punctuation + space).
    pub fn arrow(&mut self) -> &mut Self {
        self.space().punct("->").space()
    }
}
