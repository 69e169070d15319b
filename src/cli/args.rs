//! CLI argument definitions using clap derive

use crate::config::ChromeConfig;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Pupprinteer - HTML to PDF and image conversion with a bundled headless Chrome
#[derive(Parser, Debug)]
#[command(name = "pupprinteer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable all logging and status output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PUPPRINTEER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub chrome: ChromeArgs,
}

/// Browser source and cache overrides
#[derive(Args, Debug, Default)]
pub struct ChromeArgs {
    /// Custom Chrome executable (uses the bundled Chrome if not specified)
    #[arg(short = 'e', long, global = true, env = "PUPPRINTEER_CHROME_EXECUTABLE")]
    pub chrome_executable: Option<PathBuf>,

    /// Directory the bundled Chrome is extracted into
    #[arg(long, global = true, env = "PUPPRINTEER_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Bundled Chrome zip archive
    #[arg(long, global = true, env = "PUPPRINTEER_CHROME_ARCHIVE")]
    pub chrome_archive: Option<PathBuf>,

    /// File containing the bundled Chrome version
    #[arg(long, global = true, env = "PUPPRINTEER_CHROME_VERSION_FILE")]
    pub chrome_version_file: Option<PathBuf>,
}

impl ChromeArgs {
    /// Overrides to layer on top of the config file
    pub fn to_overrides(&self) -> ChromeConfig {
        ChromeConfig {
            cache_dir: self.cache_dir.clone(),
            archive: self.chrome_archive.clone(),
            version_file: self.chrome_version_file.clone(),
            executable: self.chrome_executable.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the bundled Chrome if needed and print its executable path
    Ensure,

    /// Display debug information about the current setup
    Debug(DebugArgs),

    /// Remove the extracted Chrome cache
    Clear(ClearArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the debug command
#[derive(Parser, Debug)]
pub struct DebugArgs {
    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for the debug command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
