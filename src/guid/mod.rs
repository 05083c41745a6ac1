//! GUID provisioning for the manifest.
//!
//! WiX needs a stable GUID for the product upgrade code and for every component
//! the templates emit (files, environment variables, shortcuts). GUIDs are
//! generated once, only for slots that are empty, and are expected to be
//! persisted right after so later builds reuse them.

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;
use uuid::Uuid;

/// Source of new GUIDs
pub trait GuidGenerator {
    /// Produce a new globally unique identifier
    fn generate(&mut self) -> Result<String>;
}

/// Random (v4) UUIDs in the upper-case hyphenated form WiX uses
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl GuidGenerator for UuidGenerator {
    fn generate(&mut self) -> Result<String> {
        let guid = Uuid::new_v4();
        Ok(guid
            .hyphenated()
            .encode_upper(&mut Uuid::encode_buffer())
            .to_owned())
    }
}

impl Manifest {
    /// Whether any GUID required by the templates is missing
    pub fn needs_identifiers(&self) -> bool {
        self.upgrade_code.is_empty()
            || self.files.guid.is_empty()
            || (self.env.guid.is_empty() && !self.env.vars.is_empty())
            || (self.shortcuts.guid.is_empty() && !self.shortcuts.items.is_empty())
    }

    /// Generate every missing GUID.
    ///
    /// Slots are filled in order: upgrade code, files, environment, shortcuts.
    /// Returns whether any slot was filled. On a generator failure the slots
    /// filled before it keep their new value.
    pub fn provision_identifiers<G>(&mut self, generator: &mut G) -> Result<bool>
    where
        G: GuidGenerator + ?Sized,
    {
        let mut updated = false;

        updated |= provision(&mut self.upgrade_code, true, generator, "upgrade code")?;
        updated |= provision(&mut self.files.guid, true, generator, "files")?;

        let has_vars = !self.env.vars.is_empty();
        updated |= provision(&mut self.env.guid, has_vars, generator, "env")?;

        let has_shortcuts = !self.shortcuts.items.is_empty();
        updated |= provision(&mut self.shortcuts.guid, has_shortcuts, generator, "shortcuts")?;

        Ok(updated)
    }
}

fn provision<G>(slot: &mut String, required: bool, generator: &mut G, name: &str) -> Result<bool>
where
    G: GuidGenerator + ?Sized,
{
    if !required || !slot.is_empty() {
        return Ok(false);
    }

    let guid = generator.generate()?;
    if guid.is_empty() {
        return Err(ManifestError::Generation {
            reason: format!("generator returned an empty GUID for {}", name),
        });
    }

    log::debug!("Generated {} GUID {}", name, guid);
    *slot = guid;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{EnvVar, Shortcut};

    struct Counter(usize);

    impl GuidGenerator for Counter {
        fn generate(&mut self) -> Result<String> {
            self.0 += 1;
            Ok(format!("GUID-{}", self.0))
        }
    }

    #[test]
    fn test_uuid_generator_format() {
        let guid = UuidGenerator.generate().unwrap();
        assert_eq!(guid.len(), 36);
        assert_eq!(guid, guid.to_uppercase());
        assert!(Uuid::parse_str(&guid).is_ok());
    }

    #[test]
    fn test_uuid_generator_is_unique() {
        let mut generator = UuidGenerator;
        assert_ne!(generator.generate().unwrap(), generator.generate().unwrap());
    }

    #[test]
    fn test_optional_slots_skipped_when_lists_empty() {
        let mut manifest = Manifest::default();
        let mut generator = Counter(0);

        assert!(manifest.provision_identifiers(&mut generator).unwrap());
        assert_eq!(manifest.upgrade_code, "GUID-1");
        assert_eq!(manifest.files.guid, "GUID-2");
        assert!(manifest.env.guid.is_empty());
        assert!(manifest.shortcuts.guid.is_empty());
        assert!(!manifest.needs_identifiers());
    }

    #[test]
    fn test_optional_slots_filled_when_lists_present() {
        let mut manifest = Manifest::default();
        manifest.env.vars.push(EnvVar::default());
        manifest.shortcuts.items.push(Shortcut::default());
        let mut generator = Counter(0);

        manifest.provision_identifiers(&mut generator).unwrap();
        assert_eq!(manifest.env.guid, "GUID-3");
        assert_eq!(manifest.shortcuts.guid, "GUID-4");
    }

    #[test]
    fn test_empty_guid_from_generator_is_rejected() {
        struct Blank;
        impl GuidGenerator for Blank {
            fn generate(&mut self) -> Result<String> {
                Ok(String::new())
            }
        }

        let mut manifest = Manifest::default();
        let err = manifest.provision_identifiers(&mut Blank).unwrap_err();
        assert!(matches!(err, ManifestError::Generation { .. }));
        assert!(manifest.upgrade_code.is_empty());
    }
}
