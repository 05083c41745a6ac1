//! Persistence for the `wix.json` manifest.
//!
//! Identifiers are the only generated values that are written back: once a GUID
//! has been stored it must never change, otherwise MSI upgrades break.
//! Normalized and relativized values stay in memory.

mod manager;

pub use manager::{DEFAULT_MANIFEST_FILE, ManifestConfig, ManifestStore};

use crate::error::Result;
use crate::guid::GuidGenerator;
use crate::manifest::Manifest;
use std::path::Path;

impl Manifest {
    /// Write the manifest to `path`, or to `wix.json` when `path` is empty
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ManifestStore::new(path).save(self)
    }

    /// Read a manifest from `path`, or from `wix.json` when `path` is empty
    pub fn restore<P: AsRef<Path>>(path: P) -> Result<Self> {
        ManifestStore::new(path).load()
    }
}

/// Load the manifest at `path`, fill in missing GUIDs and write it back.
///
/// The document is only rewritten when a GUID was generated. Returns whether
/// it was updated.
pub fn ensure_identifiers<P, G>(path: P, generator: &mut G) -> Result<bool>
where
    P: AsRef<Path>,
    G: GuidGenerator + ?Sized,
{
    let store = ManifestStore::new(path);
    let mut manifest = store.load()?;

    let updated = manifest.provision_identifiers(generator)?;
    if updated {
        store.save(&manifest)?;
    } else {
        log::debug!("{} already has all GUIDs", store.path().display());
    }

    Ok(updated)
}
