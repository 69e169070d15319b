//! Extract-or-reuse orchestration
//!
//! The fast path (marker matches, executable present) is taken without the
//! lock. The slow path takes the cache lock, checks again in case another
//! process just finished, and only then extracts.

use super::bundle::BundleReference;
use super::extract::{extract, ExtractOutcome};
use super::location::CacheLocation;
use super::lock::CacheLock;
use super::marker::read_marker;
use super::reuse::can_reuse;
use crate::error::{PupprinteerError, PupprinteerResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// How the returned executable was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySource {
    /// Previously extracted binary with a matching version marker
    CacheHit,
    /// Freshly extracted from the bundled archive
    Extracted,
    /// Archive missing, existing binary of unknown version reused
    ReusedUnversioned,
    /// Caller-supplied executable, no extraction attempted
    Override,
}

impl fmt::Display for BinarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CacheHit => "cache hit",
            Self::Extracted => "extracted",
            Self::ReusedUnversioned => "reused (unversioned)",
            Self::Override => "override",
        };
        write!(f, "{}", s)
    }
}

/// A ready-to-run browser executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBinary {
    pub executable_path: PathBuf,
    pub source: BinarySource,
}

/// Return a usable executable for `bundle`, extracting only when needed
pub async fn ensure_extracted(
    bundle: &BundleReference,
    location: Option<CacheLocation>,
) -> PupprinteerResult<ResolvedBinary> {
    let location = match location {
        Some(location) => location,
        None => CacheLocation::new(None)?,
    };

    debug!("Temp directory: {}", location.cache_root.display());
    debug!("Version file: {}", location.version_marker_path.display());
    debug!("Executable path: {}", location.executable_path.display());
    debug!("Temporary ZIP: {}", location.temp_archive_path.display());

    fs::create_dir_all(&location.cache_root)
        .await
        .map_err(|e| {
            PupprinteerError::io(
                format!("creating cache directory {}", location.cache_root.display()),
                e,
            )
        })?;

    let version = bundle.version();
    info!("Bundled Chrome version: {}", version);

    if can_reuse(&location, version).await {
        info!("Using existing Chrome binary - skipping extraction");
        return Ok(ResolvedBinary {
            executable_path: location.executable_path,
            source: BinarySource::CacheHit,
        });
    }

    let _lock = CacheLock::acquire(&location.lock_path()).await?;

    if can_reuse(&location, version).await {
        info!("Chrome binary was extracted by another process");
        return Ok(ResolvedBinary {
            executable_path: location.executable_path,
            source: BinarySource::CacheHit,
        });
    }

    let source = match extract(&bundle.archive_path, &location, version).await? {
        ExtractOutcome::Extracted => BinarySource::Extracted,
        ExtractOutcome::ReusedUnversioned => BinarySource::ReusedUnversioned,
    };

    Ok(ResolvedBinary {
        executable_path: location.executable_path,
        source,
    })
}

/// Snapshot of the cache for diagnostics; never extracts
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub location: CacheLocation,
    /// Version recorded in the marker, if readable
    pub recorded_version: Option<String>,
    /// When the marker was last written
    pub recorded_at: Option<DateTime<Utc>>,
    pub executable_exists: bool,
    /// Whether the next run would skip extraction for `declared_version`
    pub reusable: bool,
}

/// Inspect the cache against `declared_version`
pub async fn inspect(location: &CacheLocation, declared_version: Option<&str>) -> CacheStatus {
    let recorded_version = read_marker(&location.version_marker_path)
        .await
        .ok()
        .flatten();
    let recorded_at = fs::metadata(&location.version_marker_path)
        .await
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .ok();
    let executable_exists = fs::try_exists(&location.executable_path)
        .await
        .unwrap_or(false);
    let reusable = match declared_version {
        Some(version) => can_reuse(location, version).await,
        None => false,
    };

    CacheStatus {
        location: location.clone(),
        recorded_version,
        recorded_at,
        executable_exists,
        reusable,
    }
}

/// Delete everything extracted into the cache root.
///
/// Runs entirely under the cache lock. The root and its `.lock` file stay in
/// place so concurrent callers keep locking the same file. Returns `false`
/// if there was nothing to remove.
pub async fn clear(location: &CacheLocation) -> PupprinteerResult<bool> {
    if !fs::try_exists(&location.cache_root).await.unwrap_or(false) {
        return Ok(false);
    }

    let lock_path = location.lock_path();
    let _lock = CacheLock::acquire(&lock_path).await?;

    let mut entries = fs::read_dir(&location.cache_root)
        .await
        .map_err(|e| PupprinteerError::io("reading cache directory", e))?;
    let mut removed = 0usize;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PupprinteerError::io("reading cache entry", e))?
    {
        let path = entry.path();
        if path == lock_path {
            continue;
        }
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        let result = if is_dir {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        result.map_err(|e| PupprinteerError::io(format!("removing {}", path.display()), e))?;
        removed += 1;
    }

    if removed == 0 {
        debug!("Chrome cache {} is already empty", location.cache_root.display());
        return Ok(false);
    }

    info!(
        "Removed {} entries from Chrome cache {}",
        removed,
        location.cache_root.display()
    );
    Ok(true)
}
