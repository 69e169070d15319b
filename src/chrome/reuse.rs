//! Decide whether a previously extracted binary can be reused
//!
//! A matching marker alone is not enough (the executable may have been
//! deleted since), and an existing executable alone is not enough (it may
//! belong to a stale version).

use super::location::CacheLocation;
use super::marker::{read_marker, versions_match};
use tokio::fs;
use tracing::{debug, info};

/// Check marker and executable against `declared_version`.
///
/// Never fails: read errors count as "cannot reuse".
pub async fn can_reuse(location: &CacheLocation, declared_version: &str) -> bool {
    let recorded = match read_marker(&location.version_marker_path).await {
        Ok(Some(version)) => version,
        Ok(None) => {
            debug!(
                "No version file at {}",
                location.version_marker_path.display()
            );
            return false;
        }
        Err(e) => {
            debug!(
                "Error reading version file {}: {}",
                location.version_marker_path.display(),
                e
            );
            return false;
        }
    };

    info!("Found existing Chrome version: {}", recorded);

    if !versions_match(&recorded, declared_version) {
        debug!(
            "Version mismatch: cached {} vs bundled {}",
            recorded,
            declared_version.trim()
        );
        return false;
    }

    let exists = fs::try_exists(&location.executable_path)
        .await
        .unwrap_or(false);
    if !exists {
        debug!(
            "Version matches but executable is missing: {}",
            location.executable_path.display()
        );
    }
    exists
}
