//! Error types for lnfund-deps

use thiserror::Error;

/// Result type alias using lnfund-deps Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading manifests and metadata
#[derive(Debug, Error)]
pub enum Error {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but is not a JSON object
    #[error("Expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}
