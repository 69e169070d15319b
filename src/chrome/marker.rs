//! Version marker persistence
//!
//! The marker is a plain UTF-8 file holding exactly the version string of the
//! extracted binary. Surrounding whitespace is ignored on read and never
//! written.

use super::location::CacheLocation;
use crate::error::{PupprinteerError, PupprinteerResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Read the recorded version, `None` if no marker exists
pub async fn read_marker(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content.trim().to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Compare a recorded version against a candidate, ignoring whitespace
pub fn versions_match(recorded: &str, candidate: &str) -> bool {
    recorded.trim() == candidate.trim()
}

/// Overwrite the marker with `version`.
///
/// Last step of a successful extraction; once it lands the next run can
/// short-circuit.
pub async fn record_version(location: &CacheLocation, version: &str) -> PupprinteerResult<()> {
    let path = &location.version_marker_path;
    fs::write(path, version.trim()).await.map_err(|e| {
        PupprinteerError::io(format!("writing version marker {}", path.display()), e)
    })?;

    debug!("Version file updated: {}", path.display());
    Ok(())
}
