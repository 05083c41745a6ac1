//! The `wix.json` package manifest.
//!
//! [`Manifest`] owns every section of the package description. Sections are
//! serialized with kebab-case keys and empty values are left out of the document,
//! except `product`, `company` and `upgrade-code` which the WiX templates always
//! expect.
//!
//! Some fields are derived and never written back:
//!
//! | Field | Filled by |
//! |-------|-----------|
//! | [`Manifest::version_ok`] | [`Manifest::normalize`] |
//! | [`Manifest::rel_dirs`] | [`Manifest::relativize_paths`] |
//! | [`ChocoSettings::msi_file`], [`ChocoSettings::build_dir`], [`ChocoSettings::change_log`] | the caller, at render time |
//!
//! ```json
//! {
//!   "product": "hello",
//!   "company": "Acme",
//!   "version": "1.2.3-beta",
//!   "upgrade-code": "8A5C2F2E-0C63-4D6B-9A0B-6E0F3A1C9D11",
//!   "files": { "guid": "...", "items": ["hello.exe"] },
//!   "env": {
//!     "guid": "...",
//!     "vars": [
//!       { "name": "PATH", "value": "[INSTALLDIR]", "permanent": "no",
//!         "system": "no", "action": "set", "part": "last" }
//!     ]
//!   },
//!   "choco": { "description": "Say hello", "project-url": "https://example.com" }
//! }
//! ```

mod flag;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete package description consumed by the installer templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Manifest {
    /// Product name
    pub product: String,

    /// Company (manufacturer) name
    pub company: String,

    /// Version as written by the user, e.g. "1.2.3-beta+001"
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// MSI-compatible `major.minor.patch` form of [`Manifest::version`].
    ///
    /// Empty until [`Manifest::normalize`] succeeds.
    #[serde(skip)]
    pub version_ok: String,

    /// Path to the license file shown by the installer
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license: String,

    /// Upgrade code shared by every version of the product
    pub upgrade_code: String,

    /// Files to install
    #[serde(skip_serializing_if = "FilesSection::is_empty")]
    pub files: FilesSection,

    /// Directories to install, as written by the user
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<String>,

    /// [`Manifest::directories`] relative to the build output directory
    #[serde(skip)]
    pub rel_dirs: Vec<String>,

    /// Environment variables set by the installer
    #[serde(skip_serializing_if = "EnvSection::is_empty")]
    pub env: EnvSection,

    /// Start menu shortcuts
    #[serde(skip_serializing_if = "ShortcutsSection::is_empty")]
    pub shortcuts: ShortcutsSection,

    /// Chocolatey package metadata
    #[serde(skip_serializing_if = "ChocoSettings::is_empty")]
    pub choco: ChocoSettings,
}

/// Installed files, grouped under a single component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// Component GUID
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,

    /// File paths, rewritten in place by [`Manifest::relativize_paths`]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

impl FilesSection {
    /// True when neither a GUID nor any file is set
    pub fn is_empty(&self) -> bool {
        self.guid.is_empty() && self.items.is_empty()
    }
}

/// Environment variables, grouped under a single component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSection {
    /// Component GUID, required once `vars` is non-empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,

    /// Variables to set
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<EnvVar>,
}

impl EnvSection {
    /// True when neither a GUID nor any variable is set
    pub fn is_empty(&self) -> bool {
        self.guid.is_empty() && self.vars.is_empty()
    }
}

/// A single environment variable, mirroring the WiX `Environment` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVar {
    /// Variable name
    pub name: String,

    /// Variable value, may reference installer properties like `[INSTALLDIR]`
    pub value: String,

    /// Keep the variable on uninstall
    #[serde(with = "flag")]
    pub permanent: bool,

    /// Machine-wide rather than per-user
    #[serde(with = "flag")]
    pub system: bool,

    /// `set`, `create` or `remove`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,

    /// `all`, `first` or `last`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub part: String,
}

/// Start menu shortcuts, grouped under a single component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutsSection {
    /// Component GUID, required once `items` is non-empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub guid: String,

    /// Shortcuts to create
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Shortcut>,
}

impl ShortcutsSection {
    /// True when neither a GUID nor any shortcut is set
    pub fn is_empty(&self) -> bool {
        self.guid.is_empty() && self.items.is_empty()
    }
}

/// A single shortcut
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shortcut {
    /// Display name
    pub name: String,

    /// Tooltip text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Shortcut target, e.g. `[INSTALLDIR]hello.exe`
    pub target: String,

    /// Working directory
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wdir: String,

    /// Command line passed to the target
    #[serde(skip_serializing_if = "String::is_empty")]
    pub arguments: String,

    /// Path to an `.ico` file. WiX rejects whitespace in this path.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon: String,
}

/// Chocolatey (nuget) package metadata.
///
/// Empty identity fields are filled from the product metadata by
/// [`Manifest::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChocoSettings {
    /// Package id, defaults to the product name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Defaults to the product name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Defaults to the company name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub authors: String,

    /// Defaults to the company name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owners: String,

    /// Defaults to the product name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Project homepage
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_url: String,

    /// Space separated tags
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tags: String,

    /// License text URL
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license_url: String,

    /// Package icon URL
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_url: String,

    /// Require license acceptance on install
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub require_license: bool,

    /// Path of the built `.msi` to embed in the package
    #[serde(skip)]
    pub msi_file: Option<PathBuf>,

    /// Directory the package is assembled in
    #[serde(skip)]
    pub build_dir: Option<PathBuf>,

    /// Changelog rendered into the release notes
    #[serde(skip)]
    pub change_log: Option<PathBuf>,
}

impl ChocoSettings {
    /// True when no persisted field is set
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.title.is_empty()
            && self.authors.is_empty()
            && self.owners.is_empty()
            && self.description.is_empty()
            && self.project_url.is_empty()
            && self.tags.is_empty()
            && self.license_url.is_empty()
            && self.icon_url.is_empty()
            && !self.require_license
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_manifest_keeps_required_keys() {
        let value = serde_json::to_value(Manifest::default()).unwrap();
        assert_eq!(
            value,
            json!({ "product": "", "company": "", "upgrade-code": "" })
        );
    }

    #[test]
    fn test_derived_fields_are_not_serialized() {
        let mut manifest = Manifest {
            version: "1.0.0-rc1".to_string(),
            version_ok: "1.0.0".to_string(),
            directories: vec!["assets".to_string()],
            rel_dirs: vec!["../assets".to_string()],
            ..Default::default()
        };
        manifest.choco.build_dir = Some(PathBuf::from("build"));

        let value = serde_json::to_value(&manifest).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("version-ok"));
        assert!(!object.contains_key("rel-dirs"));
        assert!(!object.contains_key("choco"));
        assert_eq!(object["directories"], json!(["assets"]));
    }

    #[test]
    fn test_missing_keys_default_to_zero_values() {
        let manifest: Manifest = serde_json::from_str(r#"{ "product": "hello" }"#).unwrap();
        assert_eq!(manifest.product, "hello");
        assert!(manifest.company.is_empty());
        assert!(manifest.files.items.is_empty());
        assert!(!manifest.choco.require_license);
    }

    #[test]
    fn test_kebab_case_choco_keys() {
        let manifest: Manifest = serde_json::from_str(
            r#"{ "choco": { "project-url": "https://example.com", "require-license": true } }"#,
        )
        .unwrap();
        assert_eq!(manifest.choco.project_url, "https://example.com");
        assert!(manifest.choco.require_license);
    }

    #[test]
    fn test_env_flags_use_wix_spelling() {
        let var = EnvVar {
            name: "PATH".to_string(),
            value: "[INSTALLDIR]".to_string(),
            permanent: false,
            system: true,
            action: "set".to_string(),
            part: "last".to_string(),
        };
        let value = serde_json::to_value(&var).unwrap();
        assert_eq!(value["permanent"], json!("no"));
        assert_eq!(value["system"], json!("yes"));

        let back: EnvVar = serde_json::from_value(value).unwrap();
        assert_eq!(back, var);
    }
}
