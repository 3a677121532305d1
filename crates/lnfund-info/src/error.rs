//! Error types for lnfund-info

use thiserror::Error;

/// Result type alias for lnfund-info operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for registry lookups
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry answered with a non-success status
    #[error("HTTP request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded for URL: {0}")]
    RateLimitExceeded(String),

    /// Response body is not valid package metadata
    #[error("Failed to parse registry response: {0}")]
    Metadata(#[from] lnfund_deps::Error),

    /// Invalid package name format
    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    /// Registry base URL is unusable
    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidRegistryUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

impl Error {
    /// Whether the request gave up because it ran past the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Whether the registry reported the package as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { status: 404, .. })
    }
}
