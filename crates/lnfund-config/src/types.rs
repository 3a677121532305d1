use lnfund_core::{TraversalPolicy, DEFAULT_LEVELS};
use lnfund_info::NPM_REGISTRY_URL;
use serde::{Deserialize, Serialize};

/// Main configuration structure for lnfund
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LnfundConfig {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistrySettings,

    /// Traversal settings
    #[serde(default)]
    pub scan: ScanSettings,
}

/// Registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySettings {
    /// Base URL of the npm-compatible registry
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side request cap; unset means unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<u32>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: None,
        }
    }
}

/// Traversal settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanSettings {
    /// Dependency levels to follow from the manifest
    #[serde(default = "default_levels")]
    pub levels: u32,

    /// Whether packages met again are fetched again
    #[serde(default)]
    pub policy: TraversalPolicy,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            policy: TraversalPolicy::default(),
        }
    }
}

fn default_registry_url() -> String {
    NPM_REGISTRY_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_levels() -> u32 {
    DEFAULT_LEVELS
}
