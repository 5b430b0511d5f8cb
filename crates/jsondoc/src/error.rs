use thiserror::Error;

use crate::types::Id;

/// Errors raised while loading a rustdoc JSON document.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse rustdoc JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("root item {0} is missing from the index")]
    MissingRoot(Id),

    #[error("root item {0} is not a module")]
    RootNotModule(Id),
}

pub type Result<T> = std::result::Result<T, Error>;
