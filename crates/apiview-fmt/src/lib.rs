//! Output model for rendered API surfaces.
//!
//! This crate provides:
//! - [`ReviewToken`] and [`ReviewLine`], the serializable line tree
//! - [`Output`] for building token sequences
//! - [`Colorizer`] and [`lines_to_text`] for terminal output

mod colorizer;
mod line;
mod output;
mod tokens;

pub use colorizer::Colorizer;
pub use line::{CodeFile, ReviewLine, lines_to_text};
pub use output::Output;
pub use tokens::{ReviewToken, TokenKind, tokens_to_string};
