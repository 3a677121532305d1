use crate::types::LnfundConfig;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("Config file already exists at {0}")]
    ConfigExists(PathBuf),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Manager for lnfund configuration
///
/// Settings live in ~/.lnfund/config.toml unless a path is given.
pub struct ConfigManager {
    config_path: PathBuf,
    config: LnfundConfig,
}

impl ConfigManager {
    /// Get the default config path (~/.lnfund/config.toml)
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".lnfund").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults if
    /// the file does not exist
    pub async fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        if !tokio::fs::try_exists(&config_path).await? {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self {
                config_path,
                config: LnfundConfig::default(),
            });
        }
        Self::load_from(&config_path).await
    }

    /// Load config from specific path
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: LnfundConfig = toml::from_str(&contents)?;
        validate(&config)?;
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Write a default config file at `path`
    pub async fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigExists(path.to_path_buf()));
        }

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let manager = Self {
            config_path: path.to_path_buf(),
            config: LnfundConfig::default(),
        };
        manager.save().await?;
        Ok(manager)
    }

    /// Save config to disk atomically
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn save(&self) -> Result<(), ConfigError> {
        validate(&self.config)?;
        let toml_str = toml::to_string_pretty(&self.config)?;

        let temp_path = self.config_path.with_extension("toml.tmp");
        tokio::fs::write(&temp_path, &toml_str).await?;
        tokio::fs::rename(&temp_path, &self.config_path).await?;

        Ok(())
    }

    /// Path this config was loaded from or will be saved to
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get reference to config
    pub fn config(&self) -> &LnfundConfig {
        &self.config
    }

    /// Get mutable reference to config (caller must call save())
    pub fn config_mut(&mut self) -> &mut LnfundConfig {
        &mut self.config
    }
}

/// Check values serde cannot check on its own
pub fn validate(config: &LnfundConfig) -> Result<(), ConfigError> {
    let registry = &config.registry;

    let url = url::Url::parse(&registry.url).map_err(|e| ConfigError::Invalid {
        field: "registry.url",
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            field: "registry.url",
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if registry.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "registry.timeout_secs",
            reason: "must be greater than zero".to_string(),
        });
    }

    if registry.requests_per_second == Some(0) {
        return Err(ConfigError::Invalid {
            field: "registry.requests_per_second",
            reason: "must be greater than zero (omit it to disable limiting)".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnfund_core::TraversalPolicy;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let manager = ConfigManager::init_at(&config_path).await.unwrap();
        assert_eq!(manager.config(), &LnfundConfig::default());

        let loaded = ConfigManager::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.config(), &LnfundConfig::default());
        assert_eq!(loaded.path(), config_path.as_path());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        ConfigManager::init_at(&config_path).await.unwrap();
        let result = ConfigManager::init_at(&config_path).await;
        assert!(matches!(result, Err(ConfigError::ConfigExists(_))));
    }

    #[tokio::test]
    async fn test_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigManager::load_from(&temp_dir.path().join("absent.toml")).await;
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[scan]
levels = 3
policy = "skip-visited"
"#,
        )
        .unwrap();

        let manager = ConfigManager::load_from(&config_path).await.unwrap();
        let config = manager.config();
        assert_eq!(config.scan.levels, 3);
        assert_eq!(config.scan.policy, TraversalPolicy::SkipVisited);
        assert_eq!(config.registry.url, "https://registry.npmjs.org");
        assert_eq!(config.registry.timeout_secs, 30);
        assert_eq!(config.registry.requests_per_second, None);
    }

    #[tokio::test]
    async fn test_save_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let mut manager = ConfigManager::init_at(&config_path).await.unwrap();

        manager.config_mut().registry.url = "http://localhost:4873".to_string();
        manager.config_mut().registry.requests_per_second = Some(4);
        manager.save().await.unwrap();

        let loaded = ConfigManager::load_from(&config_path).await.unwrap();
        assert_eq!(loaded.config().registry.url, "http://localhost:4873");
        assert_eq!(loaded.config().registry.requests_per_second, Some(4));
        assert!(!config_path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LnfundConfig::default();
        config.registry.timeout_secs = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Invalid { field: "registry.timeout_secs", .. })
        ));

        let mut config = LnfundConfig::default();
        config.registry.url = "file:///tmp/registry".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Invalid { field: "registry.url", .. })
        ));

        let mut config = LnfundConfig::default();
        config.registry.requests_per_second = Some(0);
        assert!(validate(&config).is_err());
    }

    #[tokio::test]
    async fn test_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[scan]\nlevels = \"many\"\n").unwrap();

        let result = ConfigManager::load_from(&config_path).await;
        assert!(matches!(result, Err(ConfigError::TomlDe(_))));
    }
}
