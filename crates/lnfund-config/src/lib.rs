pub mod manager;
pub mod types;

pub use manager::{validate, ConfigError, ConfigManager};
pub use types::{LnfundConfig, RegistrySettings, ScanSettings};
