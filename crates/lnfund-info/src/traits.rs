//! The registry seam used by the resolver

use crate::Result;
use lnfund_deps::PackageMetadata;

/// Source of a package's latest published metadata.
///
/// [`crate::RegistryClient`] talks to an npm-compatible registry over HTTP.
/// Tests and embedders can supply their own implementation.
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetch the latest published metadata of `name`
    ///
    /// # Errors
    /// Any error marks this package as unavailable for the current scan
    async fn latest(&self, name: &str) -> Result<PackageMetadata>;
}

#[async_trait::async_trait]
impl<R: Registry + ?Sized> Registry for std::sync::Arc<R> {
    async fn latest(&self, name: &str) -> Result<PackageMetadata> {
        (**self).latest(name).await
    }
}
