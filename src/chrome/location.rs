//! Cache directory layout
//!
//! Pure path arithmetic, no filesystem access.

use super::platform::PlatformId;
use crate::error::PupprinteerResult;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Subdirectory name under the OS temp folder
pub const DEFAULT_CACHE_DIR_NAME: &str = "pupprinteer-chrome";

/// Version marker file name
const VERSION_FILE: &str = "version.txt";

/// Scratch copy of the bundled archive
const TEMP_ARCHIVE_FILE: &str = "chrome-temp.zip";

/// Advisory lock file guarding extraction
const LOCK_FILE: &str = ".lock";

/// Prefix of per-extraction staging directories
pub(crate) const STAGING_PREFIX: &str = ".staging-";

/// Every path the extraction cache touches for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheLocation {
    /// Cache root directory
    pub cache_root: PathBuf,
    /// Persisted version of the extracted binary
    pub version_marker_path: PathBuf,
    /// Browser executable inside the platform folder
    pub executable_path: PathBuf,
    /// Local copy of the archive used during extraction
    pub temp_archive_path: PathBuf,
    /// Platform the layout was computed for
    pub platform: PlatformId,
}

impl CacheLocation {
    /// Build the layout for the running host.
    ///
    /// Uses the shared default cache root when `base_dir` is `None`.
    pub fn new(base_dir: Option<&Path>) -> PupprinteerResult<Self> {
        let platform = PlatformId::detect()?;
        let root = base_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(default_cache_root);
        Ok(Self::for_platform(root, platform))
    }

    /// Build the layout for an explicit platform
    pub fn for_platform(cache_root: impl Into<PathBuf>, platform: PlatformId) -> Self {
        let cache_root = cache_root.into();
        Self {
            version_marker_path: cache_root.join(VERSION_FILE),
            executable_path: platform.executable_path(&cache_root),
            temp_archive_path: cache_root.join(TEMP_ARCHIVE_FILE),
            platform,
            cache_root,
        }
    }

    /// Same platform, different cache root
    pub fn with_cache_root(&self, cache_root: impl Into<PathBuf>) -> Self {
        Self::for_platform(cache_root, self.platform)
    }

    /// Extracted platform folder
    pub fn folder_path(&self) -> PathBuf {
        self.platform.folder_path(&self.cache_root)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.cache_root.join(LOCK_FILE)
    }

    /// Fresh, uniquely named staging directory for one extraction
    pub(crate) fn new_staging_dir(&self) -> PathBuf {
        self.cache_root
            .join(format!("{}{}", STAGING_PREFIX, uuid::Uuid::new_v4().simple()))
    }
}

/// Whether `name` is a file the cache itself owns at its root.
///
/// Archive entries with these names are never published.
pub(crate) fn is_reserved_name(name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    name == VERSION_FILE
        || name == TEMP_ARCHIVE_FILE
        || name == LOCK_FILE
        || name.starts_with(STAGING_PREFIX)
}

/// Default cache root shared by all invocations without an override
pub fn default_cache_root() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_DIR_NAME)
}
