//! Registry metadata fetcher for lnfund
//!
//! Looks up the latest published metadata of npm packages, with a
//! per-request timeout and optional client-side rate limiting.
//!
//! # Example
//!
//! ```no_run
//! use lnfund_info::RegistryClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegistryClient::new()?;
//!
//!     let react = client.fetch_latest("react").await?;
//!     println!("react funding: {:?}", react.funding);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod npm;
mod traits;

pub use client::{ClientOptions, HttpClient, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use npm::{latest_url, NPM_REGISTRY_URL};
pub use traits::Registry;

use lnfund_deps::PackageMetadata;
use std::num::NonZeroU32;
use std::time::Duration;

/// Client for an npm-compatible registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: HttpClient,
    registry_url: String,
}

impl RegistryClient {
    /// Create a client for the public npm registry, without rate limiting
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start configuring a client
    pub fn builder() -> RegistryClientBuilder {
        RegistryClientBuilder::default()
    }

    /// Base URL lookups are made against
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fetch the latest published metadata of a package
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use lnfund_info::RegistryClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RegistryClient::new()?;
    /// let metadata = client.fetch_latest("@types/node").await?;
    /// println!("{:?}", metadata.version());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_latest(&self, name: &str) -> Result<PackageMetadata> {
        npm::fetch_latest(&self.http, &self.registry_url, name).await
    }
}

#[async_trait::async_trait]
impl Registry for RegistryClient {
    async fn latest(&self, name: &str) -> Result<PackageMetadata> {
        self.fetch_latest(name).await
    }
}

/// Builder for [`RegistryClient`]
#[derive(Debug, Clone)]
pub struct RegistryClientBuilder {
    registry_url: String,
    options: ClientOptions,
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        Self {
            registry_url: NPM_REGISTRY_URL.to_string(),
            options: ClientOptions::default(),
        }
    }
}

impl RegistryClientBuilder {
    /// Use a different registry (mirror, Verdaccio, test server)
    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Limit requests per second; `0` disables limiting
    pub fn rate_limit(mut self, requests_per_second: u32) -> Self {
        self.options.requests_per_second = NonZeroU32::new(requests_per_second);
        self
    }

    /// Override the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.options.user_agent = user_agent.into();
        self
    }

    /// Validate the settings and build the client
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegistryUrl`] unless the registry URL is an
    /// absolute http(s) URL, or an error if the HTTP client cannot be built.
    pub fn build(self) -> Result<RegistryClient> {
        let parsed = url::Url::parse(&self.registry_url).map_err(|e| Error::InvalidRegistryUrl {
            url: self.registry_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidRegistryUrl {
                url: self.registry_url,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(RegistryClient {
            http: HttpClient::with_options(&self.options)?,
            registry_url: self.registry_url.trim_end_matches('/').to_string(),
        })
    }
}
