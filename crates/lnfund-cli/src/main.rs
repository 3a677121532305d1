//! lnfund CLI - lightning funding addresses of your npm dependencies.

mod commands;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lnfund")]
#[command(about = "Find lightning funding addresses across your npm dependency tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Manifest to scan: a file path or an http(s) URL.
    ///
    /// A bare `config` is read as the subcommand; write `./config` to scan a
    /// file with that name.
    #[arg(value_name = "MANIFEST", default_value = lnfund_core::DEFAULT_MANIFEST_PATH)]
    manifest: String,

    /// Dependency levels to follow (1 = direct dependencies only)
    #[arg(short, long)]
    levels: Option<u32>,

    /// Registry base URL
    #[arg(long, value_name = "URL")]
    registry: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum registry requests per second
    #[arg(long, value_name = "RPS")]
    rate_limit: Option<u32>,

    /// Do not fetch a package again once it has been walked
    #[arg(long)]
    skip_visited: bool,

    /// Print the funding of every package, not only lightning addresses
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value = "human")]
    format: OutputFormat,

    /// Output JSON format (alias for --output json)
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(long)]
    no_progress: bool,

    /// Verbose output
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Manage lnfund configuration
    Config {
        #[command(subcommand)]
        command: commands::ConfigCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn init_tracing(verbose: u8, bar: ProgressBar) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(progress::StderrLog::new(bar))
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Shared by the log writer and the scan spinner; hidden until a scan shows it.
    let bar = ProgressBar::hidden();
    init_tracing(cli.verbose, bar.clone());

    match cli.command {
        Some(Command::Config { command }) => {
            commands::handle_config_command(command, cli.config.as_deref())
        }
        None => commands::run_scan(
            &commands::ScanArgs {
                manifest: cli.manifest,
                levels: cli.levels,
                registry: cli.registry,
                timeout: cli.timeout,
                rate_limit: cli.rate_limit,
                skip_visited: cli.skip_visited,
                all: cli.all,
                format: if cli.json {
                    OutputFormat::Json
                } else {
                    cli.format
                },
                config: cli.config,
                no_progress: cli.no_progress,
            },
            bar,
        ),
    }
}
