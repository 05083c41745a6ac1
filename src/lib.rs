//! # Kodegen Bundler Manifest
//!
//! The `wix.json` package manifest used to generate WiX (MSI) installers and
//! Chocolatey packages.
//!
//! This crate owns the canonical data shape the installer templates consume and
//! the preparation steps applied before rendering:
//!
//! - **Persistence**: load and save `wix.json` ([`Manifest::restore`], [`Manifest::persist`])
//! - **GUID provisioning**: fill missing upgrade/component GUIDs ([`Manifest::provision_identifiers`])
//! - **Normalization**: MSI version and Chocolatey defaults ([`Manifest::normalize`])
//! - **Relativization**: paths relative to the build output ([`Manifest::relativize_paths`])
//!
//! ## Usage
//!
//! ```no_run
//! use kodegen_bundler_manifest::{Manifest, UuidGenerator};
//!
//! # fn main() -> kodegen_bundler_manifest::Result<()> {
//! let mut manifest = Manifest::restore("wix.json")?;
//! if manifest.provision_identifiers(&mut UuidGenerator)? {
//!     manifest.persist("wix.json")?;
//! }
//! manifest.normalize()?;
//! manifest.relativize_paths("build/amd64")?;
//! # Ok(())
//! # }
//! ```
//!
//! Operations are synchronous and mutate the [`Manifest`] they are called on.
//! A failed [`Manifest::provision_identifiers`] or [`Manifest::relativize_paths`]
//! keeps the changes made before the failure.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod guid;
pub mod manifest;
pub mod normalize;
pub mod paths;
pub mod store;

// Re-export main types for public API
pub use error::{ManifestError, Result};
pub use guid::{GuidGenerator, UuidGenerator};
pub use manifest::{
    ChocoSettings, EnvSection, EnvVar, FilesSection, Manifest, Shortcut, ShortcutsSection,
};
pub use normalize::REQUIRED_CHOCO_TAG;
pub use normalize::version::msi_version;
pub use paths::relative_path;
pub use store::{DEFAULT_MANIFEST_FILE, ManifestConfig, ManifestStore, ensure_identifiers};
