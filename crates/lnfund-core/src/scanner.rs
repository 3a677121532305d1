//! Manifest-to-lightning-map pipeline.

use lnfund_deps::{FundingMap, LightningMap, Manifest};
use lnfund_info::{ClientOptions, HttpClient, Registry, RegistryClient};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::filter::filter_lightning;
use crate::progress::ProgressSink;
use crate::resolver::{ResolveStats, Resolver, TraversalPolicy};

/// Manifest read when no path is given.
pub const DEFAULT_MANIFEST_PATH: &str = "package.json";

/// Levels walked when no depth is given: direct dependencies only.
pub const DEFAULT_LEVELS: u32 = 1;

/// Everything one scan produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Funding of every package fetched, lightning or not.
    pub funding: FundingMap,
    /// Lightning address per package.
    pub lightning: LightningMap,
    /// Lookup counters.
    pub stats: ResolveStats,
}

/// Loads a manifest, walks its dependencies and filters lightning funding.
pub struct FundingScanner<R = RegistryClient> {
    resolver: Resolver<R>,
    document_options: ClientOptions,
}

impl FundingScanner<RegistryClient> {
    /// Scanner for the public npm registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn npm() -> Result<Self> {
        Ok(Self::new(RegistryClient::new()?))
    }
}

impl<R: Registry> FundingScanner<R> {
    /// Scanner over any registry.
    pub fn new(registry: R) -> Self {
        Self {
            resolver: Resolver::new(registry),
            document_options: ClientOptions::default(),
        }
    }

    /// Set the revisit policy.
    pub fn with_policy(mut self, policy: TraversalPolicy) -> Self {
        self.resolver = self.resolver.with_policy(policy);
        self
    }

    /// Report progress to `sink`.
    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.resolver = self.resolver.with_progress(sink);
        self
    }

    /// HTTP settings used when the manifest itself is a URL.
    pub fn with_document_options(mut self, options: ClientOptions) -> Self {
        self.document_options = options;
        self
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &Resolver<R> {
        &self.resolver
    }

    /// Read a manifest from a filesystem path or an `http(s)://` URL.
    pub async fn load_manifest(&self, source: &str) -> Result<Manifest> {
        let content = if is_remote(source) {
            let client = HttpClient::with_options(&self.document_options)?;
            client
                .get_text(source)
                .await
                .map_err(|e| Error::ManifestFetch {
                    url: source.to_string(),
                    source: e,
                })?
        } else {
            tokio::fs::read_to_string(Path::new(source))
                .await
                .map_err(|e| Error::ManifestRead {
                    path: source.into(),
                    source: e,
                })?
        };

        Manifest::from_json_str(&content).map_err(|e| Error::ManifestParse {
            location: source.to_string(),
            source: e,
        })
    }

    /// Walk `levels` deep from `manifest` and keep everything collected.
    pub async fn scan(&self, manifest: &Manifest, levels: u32) -> ScanReport {
        let progress = self.resolver.progress();
        if let Some(progress) = progress {
            progress.started();
        }

        let names = manifest.dependency_names();
        tracing::debug!(dependencies = names.len(), levels, "scanning manifest");

        let mut funding = FundingMap::new();
        let stats = self.resolver.resolve(&names, levels, &mut funding).await;
        let lightning = filter_lightning(&funding);

        if let Some(progress) = progress {
            progress.finished(&stats);
        }
        tracing::info!(
            lookups = stats.lookups,
            failures = stats.failures,
            packages = funding.len(),
            lightning = lightning.len(),
            "scan complete"
        );

        ScanReport {
            funding,
            lightning,
            stats,
        }
    }

    /// Lightning addresses of the dependencies of an in-memory manifest.
    pub async fn fetch_funding_info(&self, manifest: &Manifest, levels: u32) -> LightningMap {
        self.scan(manifest, levels).await.lightning
    }

    /// Lightning addresses of the dependencies of the manifest at `source`.
    ///
    /// A manifest that cannot be read or parsed is logged and yields an
    /// empty map.
    pub async fn get_funding_details(&self, source: &str, levels: u32) -> LightningMap {
        match self.load_manifest(source).await {
            Ok(manifest) => self.fetch_funding_info(&manifest, levels).await,
            Err(e) => {
                tracing::error!(source, error = %e, "Error reading package.json");
                LightningMap::new()
            }
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
