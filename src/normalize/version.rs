//! MSI-compatible version strings.
//!
//! The `Version` attribute of a WiX `Product` only accepts dotted numbers, so
//! pre-release and build metadata have to go. Parsing is lenient in the same
//! places users expect it to be: a leading `v` is ignored, missing minor or
//! patch components read as zero and zero-padded parts are read as numbers.

use crate::error::{ManifestError, Result};
use semver::Version;

/// Parse `version` as a semantic version, accepting `v1.2.3`, `1.2` and
/// zero-padded parts like `2023.01.15`.
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);

    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);

    if let Some([major, minor, patch]) = parse_core(core)
        && valid_suffix(suffix)
    {
        // semver rejects leading zeros in pre-release identifiers, the suffix is
        // dropped for MSI anyway
        return Ok(Version::parse(&format!("{}.{}.{}{}", major, minor, patch, suffix))
            .unwrap_or_else(|_| Version::new(major, minor, patch)));
    }

    Version::parse(trimmed).map_err(|source| ManifestError::VersionFormat {
        version: version.to_string(),
        source,
    })
}

/// One to three dot separated numbers, missing parts read as zero
fn parse_core(core: &str) -> Option<[u64; 3]> {
    let mut numbers = [0u64; 3];
    let mut count = 0;
    for part in core.split('.') {
        if count == numbers.len() || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        numbers[count] = part.parse().ok()?;
        count += 1;
    }
    Some(numbers)
}

/// `-pre.release` and/or `+build.meta` made of `[0-9A-Za-z-]` identifiers
fn valid_suffix(suffix: &str) -> bool {
    let identifiers = |text: &str| {
        text.split('.').all(|id| {
            !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
    };

    let (pre, build) = match suffix.split_once('+') {
        Some((pre, build)) => (pre, Some(build)),
        None => (suffix, None),
    };
    let pre_ok = pre.is_empty() || pre.strip_prefix('-').is_some_and(identifiers);
    pre_ok && build.is_none_or(identifiers)
}

/// `major.minor.patch` of `version`, without pre-release or build metadata
pub fn msi_version(version: &str) -> Result<String> {
    let parsed = parse_version(version)?;
    Ok(format!("{}.{}.{}", parsed.major, parsed.minor, parsed.patch))
}
