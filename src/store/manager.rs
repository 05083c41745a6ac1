//! Reading and writing the manifest document.

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name used when no manifest path is given
pub const DEFAULT_MANIFEST_FILE: &str = "wix.json";

/// Configuration for manifest persistence
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    /// Write to a temporary sibling file and rename it over the manifest
    pub atomic_write: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self { atomic_write: true }
    }
}

/// Loads and saves a manifest at a fixed path
#[derive(Debug, Clone)]
pub struct ManifestStore {
    /// Path to the manifest document
    manifest_path: PathBuf,
    /// Configuration for persistence
    config: ManifestConfig,
}

impl ManifestStore {
    /// Create a store for `manifest_path`, or for [`DEFAULT_MANIFEST_FILE`] when it is empty
    pub fn new<P: AsRef<Path>>(manifest_path: P) -> Self {
        Self::with_config(manifest_path, ManifestConfig::default())
    }

    /// Create a store with custom configuration
    pub fn with_config<P: AsRef<Path>>(manifest_path: P, config: ManifestConfig) -> Self {
        let manifest_path = manifest_path.as_ref();
        let manifest_path = if manifest_path.as_os_str().is_empty() {
            PathBuf::from(DEFAULT_MANIFEST_FILE)
        } else {
            manifest_path.to_path_buf()
        };

        Self {
            manifest_path,
            config,
        }
    }

    /// Path of the manifest document
    pub fn path(&self) -> &Path {
        &self.manifest_path
    }

    /// Check if the manifest document exists
    pub fn exists(&self) -> bool {
        self.manifest_path.exists()
    }

    /// Read and decode the manifest
    pub fn load(&self) -> Result<Manifest> {
        let content = fs::read_to_string(&self.manifest_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: self.manifest_path.clone(),
                }
            } else {
                self.io_error(e)
            }
        })?;

        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|e| ManifestError::Decode {
                path: self.manifest_path.clone(),
                source: e,
            })?;

        log::info!("Loaded manifest from {}", self.manifest_path.display());
        if manifest.needs_identifiers() {
            log::warn!(
                "Manifest {} is missing GUIDs, provision them before rendering",
                self.manifest_path.display()
            );
        }

        Ok(manifest)
    }

    /// Encode and write the manifest
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(manifest).map_err(|e| self.io_error(e.into()))?;

        if self.config.atomic_write {
            let temp_file_path = self.temp_file_path();

            let written = fs::File::create(&temp_file_path)
                .and_then(|mut file| {
                    file.write_all(serialized.as_bytes())?;
                    file.sync_all()
                })
                .and_then(|()| fs::rename(&temp_file_path, &self.manifest_path));

            if let Err(e) = written {
                let _ = fs::remove_file(&temp_file_path);
                return Err(self.io_error(e));
            }
        } else {
            fs::write(&self.manifest_path, serialized.as_bytes()).map_err(|e| self.io_error(e))?;
        }

        log::info!("Wrote manifest to {}", self.manifest_path.display());
        Ok(())
    }

    /// Sibling file the manifest is staged in, e.g. `wix.json.tmp`
    fn temp_file_path(&self) -> PathBuf {
        let mut name = self.manifest_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> ManifestError {
        ManifestError::Io {
            path: self.manifest_path.clone(),
            source,
        }
    }
}
