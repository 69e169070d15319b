//! Debug command - report platform, bundle and cache state

use crate::chrome::{inspect, BundleReference, CacheStatus, PlatformId};
use crate::cli::args::{DebugArgs, OutputFormat};
use crate::config::{ChromeConfig, Config};
use crate::error::PupprinteerResult;
use crate::ui::{self, UiContext};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Everything the debug command reports
#[derive(Debug, Serialize)]
struct DebugReport {
    platform: PlatformId,
    executable_override: Option<PathBuf>,
    bundle: BundleInfo,
    cache: CacheStatus,
}

#[derive(Debug, Serialize)]
struct BundleInfo {
    archive_path: PathBuf,
    archive_exists: bool,
    version_file: PathBuf,
    /// `None` when the version file cannot be read
    declared_version: Option<String>,
}

/// Execute the debug command
pub async fn execute(args: DebugArgs, config: &Config, ctx: &UiContext) -> PupprinteerResult<()> {
    let report = collect(&config.chrome).await?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_text(&report, ctx),
    }

    Ok(())
}

async fn collect(chrome: &ChromeConfig) -> PupprinteerResult<DebugReport> {
    let location = chrome.location()?;
    let archive_path = chrome.archive_path()?;
    let version_file = chrome.version_file_path()?;

    let declared_version =
        match BundleReference::from_version_file(archive_path.clone(), &version_file).await {
            Ok(bundle) => Some(bundle.version().to_string()),
            Err(e) => {
                debug!("Bundled version unavailable: {}", e);
                None
            }
        };
    let archive_exists = tokio::fs::try_exists(&archive_path).await.unwrap_or(false);

    let cache = inspect(&location, declared_version.as_deref()).await;

    Ok(DebugReport {
        platform: location.platform,
        executable_override: chrome.executable.clone(),
        bundle: BundleInfo {
            archive_path,
            archive_exists,
            version_file,
            declared_version,
        },
        cache,
    })
}

fn print_text(report: &DebugReport, ctx: &UiContext) {
    let missing = "(none)".to_string();

    ui::section("Platform");
    ui::key_value("Platform", report.platform.as_str());
    ui::key_value("Folder", report.platform.folder_name());
    ui::key_value("Executable", report.platform.executable_name());
    if let Some(path) = &report.executable_override {
        ui::key_value("Override", &path.display().to_string());
    }

    ui::section("Bundle");
    ui::key_value_status(
        ctx,
        "Archive",
        &report.bundle.archive_path.display().to_string(),
        report.bundle.archive_exists,
    );
    ui::key_value(
        "Version file",
        &report.bundle.version_file.display().to_string(),
    );
    ui::key_value_status(
        ctx,
        "Version",
        report.bundle.declared_version.as_ref().unwrap_or(&missing),
        report.bundle.declared_version.is_some(),
    );

    let cache = &report.cache;
    ui::section("Cache");
    ui::key_value("Root", &cache.location.cache_root.display().to_string());
    ui::key_value(
        "Marker",
        &cache.location.version_marker_path.display().to_string(),
    );
    ui::key_value(
        "Recorded version",
        cache.recorded_version.as_ref().unwrap_or(&missing),
    );
    if let Some(at) = cache.recorded_at {
        ui::key_value("Extracted at", &at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
    ui::key_value_status(
        ctx,
        "Executable",
        &cache.location.executable_path.display().to_string(),
        cache.executable_exists,
    );
    ui::key_value_status(
        ctx,
        "Reusable",
        if cache.reusable { "yes" } else { "no" },
        cache.reusable,
    );
}
