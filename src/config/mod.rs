//! Configuration management for Pupprinteer

pub mod schema;

pub use schema::{ChromeConfig, Config};

use crate::chrome::{
    default_bundle_dir, ensure_extracted, BinarySource, BundleReference, CacheLocation,
    ResolvedBinary, BUNDLE_ARCHIVE, BUNDLE_VERSION_FILE,
};
use crate::error::{PupprinteerError, PupprinteerResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pupprinteer")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> PupprinteerResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> PupprinteerResult<Config> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            PupprinteerError::io(format!("reading config from {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| PupprinteerError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> PupprinteerResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            PupprinteerError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> PupprinteerResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PupprinteerError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeConfig {
    /// Cache layout for the running host
    pub fn location(&self) -> PupprinteerResult<CacheLocation> {
        CacheLocation::new(self.cache_dir.as_deref())
    }

    /// Archive path, defaulting to the bundle next to the executable
    pub fn archive_path(&self) -> PupprinteerResult<PathBuf> {
        match &self.archive {
            Some(path) => Ok(path.clone()),
            None => Ok(default_bundle_dir()?.join(BUNDLE_ARCHIVE)),
        }
    }

    /// Version file path, defaulting to `version.txt` beside the archive
    pub fn version_file_path(&self) -> PupprinteerResult<PathBuf> {
        if let Some(path) = &self.version_file {
            return Ok(path.clone());
        }
        let archive = self.archive_path()?;
        let dir = archive.parent().unwrap_or(Path::new("."));
        Ok(dir.join(BUNDLE_VERSION_FILE))
    }

    /// Read the bundle reference described by this config
    pub async fn bundle(&self) -> PupprinteerResult<BundleReference> {
        let archive = self.archive_path()?;
        let version_file = self.version_file_path()?;
        BundleReference::from_version_file(archive, &version_file).await
    }

    /// Resolve the browser executable.
    ///
    /// A configured executable is used as-is; otherwise the bundle is
    /// extracted or reused from the cache.
    pub async fn resolve_binary(&self) -> PupprinteerResult<ResolvedBinary> {
        if let Some(path) = &self.executable {
            debug!("Using provided Chrome executable: {}", path.display());
            return Ok(ResolvedBinary {
                executable_path: path.clone(),
                source: BinarySource::Override,
            });
        }

        debug!("Starting Chrome binary initialization...");
        let bundle = self.bundle().await?;
        ensure_extracted(&bundle, Some(self.location()?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::extract::tests::write_chrome_zip;
    use crate::chrome::PlatformId;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.general.log_format, "text");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.chrome.cache_dir = Some(PathBuf::from("/tmp/custom-chrome"));

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.chrome.cache_dir, Some(PathBuf::from("/tmp/custom-chrome")));
    }

    #[tokio::test]
    async fn invalid_toml_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[chrome\ncache_dir = 1").unwrap();

        let err = ConfigManager::with_path(path).load().await.unwrap_err();
        assert!(matches!(err, PupprinteerError::ConfigInvalid { .. }));
    }

    #[test]
    fn version_file_defaults_beside_archive() {
        let chrome = ChromeConfig {
            archive: Some(PathBuf::from("/opt/bundle/chrome.zip")),
            ..Default::default()
        };
        assert_eq!(
            chrome.version_file_path().unwrap(),
            PathBuf::from("/opt/bundle/version.txt")
        );
    }

    #[test]
    fn default_archive_is_next_to_executable() {
        let archive = ChromeConfig::default().archive_path().unwrap();
        assert!(archive.ends_with("chrome/chrome.zip"));
    }

    #[tokio::test]
    async fn executable_override_skips_bundle() {
        let temp = TempDir::new().unwrap();
        let chrome = ChromeConfig {
            cache_dir: Some(temp.path().join("cache")),
            archive: Some(temp.path().join("missing.zip")),
            executable: Some(PathBuf::from("/usr/bin/chromium")),
            ..Default::default()
        };

        let resolved = chrome.resolve_binary().await.unwrap();

        assert_eq!(resolved.source, BinarySource::Override);
        assert_eq!(resolved.executable_path, PathBuf::from("/usr/bin/chromium"));
        assert!(!temp.path().join("cache").exists());
    }

    #[tokio::test]
    async fn resolves_bundle_into_configured_cache() {
        let temp = TempDir::new().unwrap();
        let bundle_dir = temp.path().join("bundle");
        std::fs::create_dir_all(&bundle_dir).unwrap();
        write_chrome_zip(&bundle_dir.join("chrome.zip"), PlatformId::detect().unwrap());
        std::fs::write(bundle_dir.join("version.txt"), "123.0.0.0\n").unwrap();

        let chrome = ChromeConfig {
            cache_dir: Some(temp.path().join("cache")),
            archive: Some(bundle_dir.join("chrome.zip")),
            ..Default::default()
        };

        let first = chrome.resolve_binary().await.unwrap();
        let second = chrome.resolve_binary().await.unwrap();

        assert_eq!(first.source, BinarySource::Extracted);
        assert_eq!(second.source, BinarySource::CacheHit);
        assert!(first.executable_path.starts_with(temp.path().join("cache")));
    }
}
