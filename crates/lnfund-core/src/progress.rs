//! Progress reporting hooks.

use crate::resolver::ResolveStats;

/// Receives progress updates while a scan runs.
///
/// Purely cosmetic: nothing reported here affects the scan result.
pub trait ProgressSink: Send + Sync {
    /// The manifest has been read and the walk is about to start.
    fn started(&self) {}

    /// A package is about to be looked up.
    fn analyzing(&self, package: &str);

    /// The walk is over.
    fn finished(&self, _stats: &ResolveStats) {}
}

/// Sink that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn analyzing(&self, _package: &str) {}
}
