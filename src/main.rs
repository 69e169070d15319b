//! Pupprinteer - HTML to PDF and image conversion
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pupprinteer::cli::{Cli, Commands};
use pupprinteer::config::{Config, ConfigManager};
use pupprinteer::error::PupprinteerResult;
use pupprinteer::ui::UiContext;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PupprinteerResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let mut config = config_manager.load().await?;
    config.chrome = config.chrome.merged_with(&cli.chrome.to_overrides());

    init_logging(cli.verbose, cli.quiet, &config);
    debug!("Using config file {}", config_manager.path().display());

    let ctx = UiContext::detect().with_quiet(cli.quiet);

    match cli.command {
        Commands::Ensure => pupprinteer::cli::commands::ensure(&config, &ctx).await,
        Commands::Debug(args) => pupprinteer::cli::commands::debug(args, &config, &ctx).await,
        Commands::Clear(args) => pupprinteer::cli::commands::clear(args, &config, &ctx).await,
        Commands::Config(args) => {
            pupprinteer::cli::commands::config(args, &config, &config_manager, &ctx).await
        }
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, quiet: bool, config: &Config) {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("off"),
        (false, 0) => EnvFilter::new("pupprinteer=warn"),
        (false, 1) => EnvFilter::new("pupprinteer=info"),
        (false, _) => EnvFilter::new("pupprinteer=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
