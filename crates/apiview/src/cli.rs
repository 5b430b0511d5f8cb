use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;
use crate::options::DEFAULT_MAX_DEPTH;

/// Render the public API of a crate from its rustdoc JSON
#[derive(Parser, Debug)]
#[command(name = "rust-apiview", version)]
#[command(about = "Render the public API of a crate from its rustdoc JSON", long_about = None)]
#[command(after_help = "\
EXAMPLES:
  rust-apiview target/doc/serde.json                 Text listing on stdout
  rust-apiview target/doc/serde.json --format json   ReviewLine JSON
  rust-apiview serde.json -o api.txt --no-docs       Signatures only, to a file

The JSON is produced by:
  cargo +nightly rustdoc -- -Z unstable-options --output-format json")]
pub struct Cli {
    /// Path to a rustdoc JSON file
    pub input: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: Format,

    /// Write the output to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// When to use colors in text output.
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: Color,

    /// Leave doc comments out of the output
    #[arg(long)]
    pub no_docs: bool,

    /// Nesting depth at which a type is cut off and rendered as `unknown`
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Output format of the rendered API.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum Format {
    /// Indented source-like listing.
    #[default]
    Text,
    /// The line tree as a JSON `CodeFile`.
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid format '{s}', expected text or json")),
        }
    }
}
