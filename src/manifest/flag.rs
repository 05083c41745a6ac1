//! `"yes"` / `"no"` flags as WiX spells them.
//!
//! Older manifests also carry JSON booleans or an empty string, so reading is
//! lenient: `"yes"`, `"true"`, `"1"` and `true` are set, everything else is unset.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *value { "yes" } else { "no" })
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(value) => value,
        RawFlag::Text(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "yes" | "true" | "1"
        ),
    })
}
