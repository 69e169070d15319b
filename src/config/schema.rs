//! Configuration schema for Pupprinteer
//!
//! Configuration is stored at `~/.config/pupprinteer/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Bundled browser settings
    pub chrome: ChromeConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Where the bundled browser comes from and where it is extracted to.
///
/// Unset fields fall back to the bundle shipped next to the executable and
/// the shared cache under the OS temp folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Cache directory for the extracted browser
    pub cache_dir: Option<PathBuf>,

    /// Bundled zip archive
    pub archive: Option<PathBuf>,

    /// File holding the bundled version string
    pub version_file: Option<PathBuf>,

    /// Use this executable instead of the bundled browser
    pub executable: Option<PathBuf>,
}

impl ChromeConfig {
    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merged_with(&self, overrides: &ChromeConfig) -> ChromeConfig {
        ChromeConfig {
            cache_dir: overrides.cache_dir.clone().or_else(|| self.cache_dir.clone()),
            archive: overrides.archive.clone().or_else(|| self.archive.clone()),
            version_file: overrides
                .version_file
                .clone()
                .or_else(|| self.version_file.clone()),
            executable: overrides
                .executable
                .clone()
                .or_else(|| self.executable.clone()),
        }
    }
}
