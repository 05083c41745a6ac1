//! Field normalization before rendering.

pub mod version;

use crate::error::Result;
use crate::manifest::Manifest;

/// Tag appended to the Chocolatey tags on every [`Manifest::normalize`] call.
///
/// The Chocolatey community repository rejects MSI packages without it.
pub const REQUIRED_CHOCO_TAG: &str = " admin";

impl Manifest {
    /// Derive the values the WiX and Chocolatey templates need.
    ///
    /// Sets [`Manifest::version_ok`], fills empty Chocolatey identity fields from
    /// the product and company, and appends [`REQUIRED_CHOCO_TAG`] to the tags.
    ///
    /// The tag is appended on every call, so normalize a manifest only once per
    /// render.
    pub fn normalize(&mut self) -> Result<()> {
        self.version_ok = version::msi_version(&self.version)?;

        let choco = &mut self.choco;
        if choco.id.is_empty() {
            choco.id = self.product.clone();
        }
        if choco.title.is_empty() {
            choco.title = self.product.clone();
        }
        if choco.authors.is_empty() {
            choco.authors = self.company.clone();
        }
        if choco.owners.is_empty() {
            choco.owners = self.company.clone();
        }
        if choco.description.is_empty() {
            choco.description = self.product.clone();
        }
        choco.tags.push_str(REQUIRED_CHOCO_TAG);

        log::debug!(
            "Normalized {} version {} -> {}",
            self.product,
            self.version,
            self.version_ok
        );
        Ok(())
    }
}
