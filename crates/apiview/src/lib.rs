//! Render the public API of a Rust crate, read from rustdoc JSON, as a
//! deterministic tree of review lines.
//!
//! ```no_run
//! use rust_apiview::{RenderOptions, render_document};
//!
//! let json = std::fs::read_to_string("target/doc/demo.json")?;
//! let doc = jsondoc::JsonDoc::from_json(&json)?;
//! for line in render_document(&doc, &RenderOptions::default()) {
//!     println!("{:?}", line.line_id);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cli;
mod color;
mod options;
pub mod render;
mod sort;
mod walker;

#[cfg(test)]
mod testutils;

use std::fs;

use anyhow::Context;
use apiview_fmt::{CodeFile, ReviewLine, lines_to_text};
use clap::Parser;
use jsondoc::JsonDoc;
use tracing::debug;

use cli::{Cli, Format};
pub use color::Color;
pub use options::{DEFAULT_MAX_DEPTH, RenderOptions};
pub use render::RenderingContext;
pub use sort::{SortedChildren, sort_children};
pub use walker::ApiRenderer;

/// Render every module of the crate described by `doc`, root first.
pub fn render_document(doc: &JsonDoc, options: &RenderOptions) -> Vec<ReviewLine> {
    ApiRenderer::new(RenderingContext::new(doc, options)).render_crate()
}

/// The rendered crate with its package metadata.
pub fn code_file(doc: &JsonDoc, options: &RenderOptions) -> CodeFile {
    CodeFile {
        package_name: doc.crate_name().to_string(),
        package_version: doc.crate_version().map(str::to_string),
        language: "Rust".to_string(),
        review_lines: render_document(doc, options),
    }
}

/// Run the CLI with the given arguments and return the output as a string.
///
/// # Arguments
/// * `args` - Command line arguments (excluding program name)
///
/// # Returns
/// * `Ok(String)` - Successful output (stdout)
/// * `Err(String)` - Error message (stderr)
pub fn run_cli(args: &[&str]) -> Result<String, String> {
    run_cli_impl(args).map_err(|e| format!("{e:#}"))
}

fn run_cli_impl(args: &[&str]) -> anyhow::Result<String> {
    let cli =
        match Cli::try_parse_from(std::iter::once("rust-apiview").chain(args.iter().copied())) {
            Ok(cli) => cli,
            Err(e) => {
                // Handle --help and --version as successful outputs
                if e.kind() == clap::error::ErrorKind::DisplayHelp
                    || e.kind() == clap::error::ErrorKind::DisplayVersion
                {
                    return Ok(e.to_string());
                }
                return Err(e.into());
            }
        };

    let json = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let doc = JsonDoc::from_json(&json)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let options = RenderOptions {
        include_docs: !cli.no_docs,
        max_depth: cli.max_depth,
    };
    let rendered = match cli.format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(&code_file(&doc, &options))
                .context("failed to serialize the rendered API")?;
            json.push('\n');
            json
        }
        Format::Text => {
            if cli.color == Color::Always {
                colored::control::set_override(true);
            }
            let colorizer = cli.color.colorizer(cli.output.is_some());
            lines_to_text(&render_document(&doc, &options), &colorizer)
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = rendered.len(), "wrote output file");
            Ok(String::new())
        }
        None => Ok(rendered),
    }
}
