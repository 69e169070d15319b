//! Platform detection and extracted-folder naming
//!
//! Folder and executable names are fixed by the chrome-headless-shell
//! distribution and cannot be configured.

use crate::error::{PupprinteerError, PupprinteerResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable name on Unix-like platforms
const EXECUTABLE_NAME: &str = "chrome-headless-shell";

/// Executable name on Windows
const EXECUTABLE_NAME_WINDOWS: &str = "chrome-headless-shell.exe";

/// Platforms a chrome-headless-shell build is published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlatformId {
    #[serde(rename = "linux64")]
    Linux64,
    #[serde(rename = "mac-arm64")]
    MacArm64,
    #[serde(rename = "mac-x64")]
    MacX64,
    #[serde(rename = "win32")]
    Win32,
    #[serde(rename = "win64")]
    Win64,
}

impl PlatformId {
    /// Detect the platform of the running host
    pub fn detect() -> PupprinteerResult<Self> {
        let os = std::env::consts::OS;
        let arch = std::env::consts::ARCH;
        debug!("Detecting platform - OS: {}, Architecture: {}", os, arch);

        let platform = Self::from_os_arch(os, arch)?;
        debug!("Detected platform: {}", platform);
        Ok(platform)
    }

    /// Map an OS name and CPU architecture to a platform.
    ///
    /// Accepts both Rust target names (`macos`, `aarch64`, `x86_64`) and the
    /// names used by the upstream download index (`darwin`, `arm64`, `x64`).
    /// Linux is always `linux64` regardless of architecture.
    pub fn from_os_arch(os: &str, arch: &str) -> PupprinteerResult<Self> {
        match os {
            "linux" => Ok(Self::Linux64),
            "macos" | "darwin" => match arch {
                "aarch64" | "arm64" => Ok(Self::MacArm64),
                _ => Ok(Self::MacX64),
            },
            "windows" | "win32" => match arch {
                "x86_64" | "x64" => Ok(Self::Win64),
                _ => Ok(Self::Win32),
            },
            other => Err(PupprinteerError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// All supported platforms
    pub fn all() -> &'static [Self] {
        &[
            Self::Linux64,
            Self::MacArm64,
            Self::MacX64,
            Self::Win32,
            Self::Win64,
        ]
    }

    /// Identifier as used by the chrome-for-testing index
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux64 => "linux64",
            Self::MacArm64 => "mac-arm64",
            Self::MacX64 => "mac-x64",
            Self::Win32 => "win32",
            Self::Win64 => "win64",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Win32 | Self::Win64)
    }

    /// Name of the top-level folder inside the archive.
    ///
    /// Both Windows platforms share the win64 folder.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::Win32 | Self::Win64 => "chrome-headless-shell-win64",
            Self::MacArm64 => "chrome-headless-shell-mac-arm64",
            Self::MacX64 => "chrome-headless-shell-mac-x64",
            Self::Linux64 => "chrome-headless-shell-linux64",
        }
    }

    /// File name of the browser executable
    pub fn executable_name(&self) -> &'static str {
        if self.is_windows() {
            EXECUTABLE_NAME_WINDOWS
        } else {
            EXECUTABLE_NAME
        }
    }

    /// Extracted folder under `base_dir`
    pub fn folder_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(self.folder_name())
    }

    /// Executable path under `base_dir`
    pub fn executable_path(&self, base_dir: &Path) -> PathBuf {
        self.folder_path(base_dir).join(self.executable_name())
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
