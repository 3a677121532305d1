use anyhow::{Context, Result};
use clap::Subcommand;
use lnfund_config::ConfigManager;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config file (~/.lnfund/config.toml unless --config is given)
    Init,

    /// Show config file path
    Path,

    /// Print the effective configuration
    Show,
}

pub fn handle_config_command(cmd: ConfigCommand, config: Option<&Path>) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        match cmd {
            ConfigCommand::Init => {
                let path = config_path(config)?;
                let manager = ConfigManager::init_at(&path)
                    .await
                    .with_context(|| format!("Failed to initialize config at {}", path.display()))?;
                println!("✓ Config initialized at {}", manager.path().display());
            }

            ConfigCommand::Path => {
                println!("{}", config_path(config)?.display());
            }

            ConfigCommand::Show => {
                let manager = match config {
                    Some(path) => ConfigManager::load_from(path).await,
                    None => ConfigManager::load().await,
                }
                .context("Failed to load configuration")?;
                let rendered = toml::to_string_pretty(manager.config())
                    .context("Failed to render configuration")?;
                println!("# {}", manager.path().display());
                print!("{}", rendered);
            }
        }

        Ok::<(), anyhow::Error>(())
    })
}

fn config_path(config: Option<&Path>) -> Result<PathBuf> {
    match config {
        Some(path) => Ok(path.to_path_buf()),
        None => ConfigManager::config_path().context("Failed to determine config path"),
    }
}
