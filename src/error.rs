//! Error types for Pupprinteer
//!
//! All modules use `PupprinteerResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Pupprinteer operations
pub type PupprinteerResult<T> = Result<T, PupprinteerError>;

/// All errors that can occur in Pupprinteer
#[derive(Error, Debug)]
pub enum PupprinteerError {
    // Platform errors
    #[error("Unsupported platform: {0}. Pupprinteer supports Linux, macOS and Windows.")]
    UnsupportedPlatform(String),

    // Extraction errors
    #[error("Chrome archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    #[error("Failed to extract Chrome archive {archive}: {reason}")]
    ExtractionFailure { archive: PathBuf, reason: String },

    #[error("Chrome executable missing after extraction: {0}")]
    ExecutableMissingAfterExtraction(PathBuf),

    #[error("Failed to read bundled Chrome version from {path}: {source}")]
    BundleVersionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock Chrome cache at {path}: {source}")]
    CacheLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl PupprinteerError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an extraction failure for the given archive
    pub fn extraction(archive: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ExtractionFailure {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if the error was raised after extraction had started
    pub fn is_fatal_extraction(&self) -> bool {
        matches!(
            self,
            Self::ExtractionFailure { .. } | Self::ExecutableMissingAfterExtraction(_)
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ArchiveNotFound(_) => {
                Some("Pass --chrome-archive, or use --chrome-executable to skip extraction")
            }
            Self::ExtractionFailure { .. } => {
                Some("Partial files were kept for inspection. Run: pupprinteer clear")
            }
            Self::ExecutableMissingAfterExtraction(_) => {
                Some("The archive layout does not match this platform's chrome-headless-shell build")
            }
            Self::UnsupportedPlatform(_) => {
                Some("Use --chrome-executable to point at a locally installed browser")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PupprinteerError::ArchiveNotFound(PathBuf::from("/bundle/chrome.zip"));
        assert!(err.to_string().contains("Chrome archive not found"));
        assert!(err.to_string().contains("/bundle/chrome.zip"));
    }

    #[test]
    fn error_hint() {
        let err = PupprinteerError::UnsupportedPlatform("freebsd".to_string());
        assert!(err.hint().unwrap().contains("--chrome-executable"));
        assert!(PupprinteerError::User("x".to_string()).hint().is_none());
    }

    #[test]
    fn extraction_errors_are_fatal() {
        assert!(PupprinteerError::extraction("/a.zip", "bad header").is_fatal_extraction());
        assert!(
            PupprinteerError::ExecutableMissingAfterExtraction(PathBuf::from("/x"))
                .is_fatal_extraction()
        );
        assert!(!PupprinteerError::ArchiveNotFound(PathBuf::from("/a.zip")).is_fatal_extraction());
    }
}
