//! Contains all token handling logic.

use serde::{Deserialize, Serialize};

/// The syntactic role of a token, used for styling by downstream viewers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Identifiers, literals and anything without a more specific role
    Text,
    /// Symbols, like `<`, `::` or `->`
    Punctuation,
    /// A keyword, like `pub`, `impl`, `where`, or `dyn`
    Keyword,
    /// The name of a type, trait or generic parameter
    TypeName,
    /// A comment, including documentation lines
    Comment,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A token in a rendered line.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewToken {
    pub kind: TokenKind,
    pub value: String,
    /// Id of the item this token refers to, if it can be navigated to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub render_classes: Vec<String>,
    /// Whether a space follows this token when the line is printed.
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_suffix_space: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_documentation: bool,
}

impl ReviewToken {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            navigate_to_id: None,
            render_classes: vec![],
            has_suffix_space: false,
            is_documentation: false,
        }
    }

    /// The printed text of this token, including its suffix space.
    pub fn text(&self) -> String {
        if self.has_suffix_space {
            format!("{} ", self.value)
        } else {
            self.value.clone()
        }
    }
}

/// Convert a slice of tokens to a single string, without trailing whitespace.
pub fn tokens_to_string(tokens: &[ReviewToken]) -> String {
    let text: String = tokens.iter().map(ReviewToken::text).collect();
    text.trim_end().to_string()
}
