//! Error types for lnfund core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for lnfund operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the scan pipeline.
///
/// Per-package lookup failures never appear here: the resolver logs them
/// and moves on to the next package.
#[derive(Debug, Error)]
pub enum Error {
    /// Manifest file could not be read.
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Remote manifest could not be fetched.
    #[error("Failed to fetch manifest {url}: {source}")]
    ManifestFetch {
        /// URL that was requested.
        url: String,
        /// The underlying HTTP error.
        #[source]
        source: lnfund_info::Error,
    },

    /// Manifest is not a valid JSON object.
    #[error("Invalid manifest {location}: {source}")]
    ManifestParse {
        /// Path or URL of the manifest.
        location: String,
        /// The underlying parse error.
        #[source]
        source: lnfund_deps::Error,
    },

    /// Registry client could not be created.
    #[error("Registry client error: {0}")]
    Registry(#[from] lnfund_info::Error),
}
