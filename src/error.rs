//! Error types for manifest operations.
//!
//! Every operation on a [`Manifest`](crate::Manifest) returns these errors to its
//! caller unchanged. Nothing in this crate retries or swallows a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Main error type for all manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Reading or writing the manifest document failed
    #[error("Failed to access manifest {path}: {source}")]
    Io {
        /// Path of the manifest document
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Manifest document does not exist
    #[error("Manifest file not found at {path}")]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Manifest document is not valid JSON or has the wrong shape
    #[error("Failed to decode manifest {path}: {source}")]
    Decode {
        /// Path of the manifest document
        path: PathBuf,
        /// Parsing error
        #[source]
        source: serde_json::Error,
    },

    /// GUID generation failed
    #[error("Failed to generate GUID: {reason}")]
    Generation {
        /// Reason for the error
        reason: String,
    },

    /// A path could not be made absolute or relative to the output directory
    #[error("Cannot resolve path '{path}': {reason}")]
    PathResolution {
        /// Offending manifest entry
        path: String,
        /// Reason for the error
        reason: String,
    },

    /// Version string is not a semantic version
    #[error("Invalid version '{version}': {source}")]
    VersionFormat {
        /// Version string from the manifest
        version: String,
        /// Parsing error
        #[source]
        source: semver::Error,
    },
}

impl ManifestError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ManifestError::NotFound { path } => vec![
                format!("Create a manifest at {}", path.display()),
                "Pass the manifest path explicitly if it is not wix.json".to_string(),
            ],
            ManifestError::Decode { .. } => vec![
                "Check the manifest is valid JSON".to_string(),
                "Keys use kebab-case, e.g. \"upgrade-code\" and \"project-url\"".to_string(),
            ],
            ManifestError::VersionFormat { version, .. } => vec![
                format!("Use a semantic version instead of '{}', e.g. 1.2.3", version),
                "Pre-release and build suffixes are allowed: 1.2.3-beta+001".to_string(),
            ],
            ManifestError::PathResolution { path, .. } => vec![
                format!("Check that '{}' is a valid path", path),
                "Files, directories and icons must share a root with the output directory"
                    .to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
