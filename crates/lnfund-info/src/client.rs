//! HTTP client wrapper with timeout and rate limiting

use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rate limiter shared by every request of one client
pub type RegistryRateLimiter = Arc<
    RateLimiter<governor::state::NotKeyed, governor::state::InMemoryState, governor::clock::DefaultClock>,
>;

/// Settings for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Upper bound on a single request, connect to last body byte
    pub timeout: Duration,
    /// Maximum requests per second, `None` disables client-side limiting
    pub requests_per_second: Option<NonZeroU32>,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            requests_per_second: None,
            user_agent: format!("lnfund/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client wrapper for registry requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    rate_limiter: Option<RegistryRateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration (no rate limiting)
    pub fn new() -> Result<Self> {
        Self::with_options(&ClientOptions::default())
    }

    /// Create a new HTTP client from explicit options
    pub fn with_options(options: &ClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()?;

        let rate_limiter = options
            .requests_per_second
            .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Wait for rate limiter if enabled
    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }

    /// Make a GET request and return the response text
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.wait_for_rate_limit().await;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Handle rate limiting (HTTP 429)
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimitExceeded(url.to_string()));
        }

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        Ok(text)
    }
}
