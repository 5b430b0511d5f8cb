use serde::{Deserialize, Serialize};

use crate::colorizer::Colorizer;
use crate::tokens::ReviewToken;

const INDENT: &str = "    ";

/// One line of a rendered API surface, with nested child lines.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_id: Option<String>,
    pub tokens: Vec<ReviewToken>,
    /// Ties this line to another one, e.g. a doc comment or closing brace to its item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_to_line: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReviewLine>,
}

impl ReviewLine {
    pub fn new(line_id: Option<String>, tokens: Vec<ReviewToken>) -> Self {
        Self {
            line_id,
            tokens,
            related_to_line: None,
            children: vec![],
        }
    }

    pub fn with_children(mut self, children: Vec<ReviewLine>) -> Self {
        self.children = children;
        self
    }

    pub fn related_to(mut self, line_id: impl Into<String>) -> Self {
        self.related_to_line = Some(line_id.into());
        self
    }

    /// The token values of this line, without spacing.
    pub fn values(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }
}

/// A whole rendered crate, as serialized for review tools.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeFile {
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    pub language: String,
    pub review_lines: Vec<ReviewLine>,
}

/// Render a line forest as text, indenting children by four spaces per level.
pub fn lines_to_text(lines: &[ReviewLine], colorizer: &Colorizer) -> String {
    let mut out = String::new();
    write_lines(&mut out, lines, 0, colorizer);
    out
}

fn write_lines(out: &mut String, lines: &[ReviewLine], depth: usize, colorizer: &Colorizer) {
    for line in lines {
        let mut text = String::new();
        for token in &line.tokens {
            text.push_str(&colorizer.paint(token));
            if token.has_suffix_space {
                text.push(' ');
            }
        }
        let text = text.trim_end();
        if !text.is_empty() {
            out.push_str(&INDENT.repeat(depth));
            out.push_str(text);
        }
        out.push('\n');
        write_lines(out, &line.children, depth + 1, colorizer);
    }
}
