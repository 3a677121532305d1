use anyhow::{Context, Result};
use indicatif::ProgressBar;
use lnfund_config::{ConfigManager, LnfundConfig};
use lnfund_core::{FundingScanner, ScanReport, TraversalPolicy};
use lnfund_info::{ClientOptions, RegistryClient};
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::output;
use crate::progress::SpinnerProgress;
use crate::OutputFormat;

/// Options for the default scan command
#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub manifest: String,
    pub levels: Option<u32>,
    pub registry: Option<String>,
    pub timeout: Option<u64>,
    pub rate_limit: Option<u32>,
    pub skip_visited: bool,
    pub all: bool,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub no_progress: bool,
}

/// Flags merged over the config file
#[derive(Debug, Clone, PartialEq)]
struct EffectiveSettings {
    registry_url: String,
    timeout: Duration,
    requests_per_second: Option<u32>,
    levels: u32,
    policy: TraversalPolicy,
}

impl EffectiveSettings {
    fn merge(args: &ScanArgs, config: &LnfundConfig) -> Self {
        Self {
            registry_url: args
                .registry
                .clone()
                .unwrap_or_else(|| config.registry.url.clone()),
            timeout: Duration::from_secs(args.timeout.unwrap_or(config.registry.timeout_secs)),
            requests_per_second: args.rate_limit.or(config.registry.requests_per_second),
            levels: args.levels.unwrap_or(config.scan.levels),
            policy: if args.skip_visited {
                TraversalPolicy::SkipVisited
            } else {
                config.scan.policy
            },
        }
    }

    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: self.timeout,
            requests_per_second: self.requests_per_second.and_then(NonZeroU32::new),
            ..ClientOptions::default()
        }
    }
}

/// Run a scan; `bar` is the spinner handle the log writer already knows.
pub fn run_scan(args: &ScanArgs, bar: ProgressBar) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async_run_scan(args, bar))
}

async fn async_run_scan(args: &ScanArgs, bar: ProgressBar) -> Result<()> {
    let manager = match &args.config {
        Some(path) => ConfigManager::load_from(path).await,
        None => ConfigManager::load().await,
    }
    .context("Failed to load configuration")?;

    let settings = EffectiveSettings::merge(args, manager.config());
    if settings.timeout.is_zero() {
        anyhow::bail!("--timeout must be greater than zero");
    }
    tracing::debug!(?settings, "effective settings");

    let registry = RegistryClient::builder()
        .registry_url(settings.registry_url.as_str())
        .timeout(settings.timeout)
        .rate_limit(settings.requests_per_second.unwrap_or(0))
        .build()
        .context("Failed to create registry client")?;

    let progress = Arc::new(SpinnerProgress::new(
        bar,
        !args.no_progress && args.format == OutputFormat::Human,
    ));
    let scanner = FundingScanner::new(registry)
        .with_policy(settings.policy)
        .with_progress(progress)
        .with_document_options(settings.client_options());

    let report = match scanner.load_manifest(&args.manifest).await {
        Ok(manifest) => scanner.scan(&manifest, settings.levels).await,
        Err(e) => {
            // Best effort: an unreadable manifest is reported, not fatal.
            tracing::error!(manifest = %args.manifest, error = %e, "Error reading package.json");
            ScanReport::default()
        }
    };

    match (args.format, args.all) {
        (OutputFormat::Json, false) => output::print_json(&report.lightning)?,
        (OutputFormat::Json, true) => output::print_json(&report.funding)?,
        (OutputFormat::Human, false) => output::print_lightning(&report),
        (OutputFormat::Human, true) => output::print_funding(&report),
    }

    Ok(())
}
