//! Bundled Chrome archive reference
//!
//! Release builds ship `chrome/chrome.zip` and `chrome/version.txt` next to
//! the executable.

use crate::error::{PupprinteerError, PupprinteerResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory holding the bundle, relative to the executable
const BUNDLE_DIR: &str = "chrome";

/// Archive file name inside the bundle directory
pub const BUNDLE_ARCHIVE: &str = "chrome.zip";

/// Version file name inside the bundle directory
pub const BUNDLE_VERSION_FILE: &str = "version.txt";

/// A bundled archive and the version it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleReference {
    /// Path to the zip archive
    pub archive_path: PathBuf,
    /// Version shipped alongside the archive
    pub declared_version: String,
}

impl BundleReference {
    pub fn new(archive_path: impl Into<PathBuf>, declared_version: impl Into<String>) -> Self {
        Self {
            archive_path: archive_path.into(),
            declared_version: declared_version.into(),
        }
    }

    /// Read the declared version from a version file shipped with the archive
    pub async fn from_version_file(
        archive_path: impl Into<PathBuf>,
        version_file: &Path,
    ) -> PupprinteerResult<Self> {
        let content = fs::read_to_string(version_file).await.map_err(|e| {
            PupprinteerError::BundleVersionRead {
                path: version_file.to_path_buf(),
                source: e,
            }
        })?;

        let bundle = Self::new(archive_path, content.trim());
        debug!("Bundled Chrome ZIP path: {}", bundle.archive_path.display());
        debug!("Bundled version file path: {}", version_file.display());
        Ok(bundle)
    }

    /// Declared version without surrounding whitespace
    pub fn version(&self) -> &str {
        self.declared_version.trim()
    }
}

/// Default bundle directory next to the running executable
pub fn default_bundle_dir() -> PupprinteerResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| PupprinteerError::io("locating current executable", e))?;
    let dir = exe.parent().unwrap_or(Path::new("."));
    Ok(dir.join(BUNDLE_DIR))
}
