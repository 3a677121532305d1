//! lnfund Core - collect lightning funding addresses across a dependency graph.
//!
//! Given a `package.json`, the scanner looks up the latest published
//! metadata of every dependency, follows their dependencies to a bounded
//! depth, gathers each package's `funding` field and keeps the
//! lightning-typed entries:
//!
//! ```text
//! manifest ──► dependency names ──► Resolver (depth-first, sequential)
//!                                        │
//!                                        ▼
//!                                   FundingMap ──► filter_lightning ──► LightningMap
//! ```
//!
//! - [`Resolver`]: the depth-bounded registry walk
//! - [`filter_lightning`]: funding map to lightning addresses
//! - [`FundingScanner`]: the full pipeline, from a path, URL or manifest
//! - [`ProgressSink`]: optional progress hook
//!
//! # Example
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() {
//! let addresses = lnfund_core::get_funding_details("package.json", 2).await;
//! for (package, address) in &addresses {
//!     println!("{package}: {address}");
//! }
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod progress;
pub mod resolver;
pub mod scanner;

pub use error::{Error, Result};
pub use filter::{filter_lightning, strip_lightning_scheme};
pub use progress::{NoProgress, ProgressSink};
pub use resolver::{ResolveStats, Resolver, TraversalPolicy};
pub use scanner::{FundingScanner, ScanReport, DEFAULT_LEVELS, DEFAULT_MANIFEST_PATH};

pub use lnfund_deps::{Funding, FundingMap, FundingRecord, FundingSource, LightningMap, Manifest};

/// Lightning addresses for the manifest at `path` (file or URL), using the
/// public npm registry.
///
/// Never fails: an unreadable manifest or an unusable HTTP client is logged
/// and yields an empty map.
pub async fn get_funding_details(path: &str, levels: u32) -> LightningMap {
    match FundingScanner::npm() {
        Ok(scanner) => scanner.get_funding_details(path, levels).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create registry client");
            LightningMap::new()
        }
    }
}

/// Lightning addresses for an already-loaded manifest, using the public
/// npm registry.
pub async fn fetch_funding_info(manifest: &Manifest, levels: u32) -> LightningMap {
    match FundingScanner::npm() {
        Ok(scanner) => scanner.fetch_funding_info(manifest, levels).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create registry client");
            LightningMap::new()
        }
    }
}
