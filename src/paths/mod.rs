//! Path relativization against the build output directory.
//!
//! The WiX templates are rendered into an output directory and compiled from
//! there, so every file, directory and icon reference in the manifest has to be
//! relative to that directory. Paths are first made absolute against the current
//! working directory at call time, then made relative to the output directory.

use crate::error::{ManifestError, Result};
use crate::manifest::Manifest;
use path_absolutize::Absolutize;
use std::path::{Component, Path, PathBuf};

impl Manifest {
    /// Rewrite file, directory and icon paths relative to `out_dir`.
    ///
    /// - `files.items` are rewritten in place
    /// - `directories` are left as they are, their relative form is appended to `rel_dirs`
    /// - non-empty shortcut icons are rewritten in place
    ///
    /// Stops at the first entry that cannot be resolved. Entries rewritten before
    /// it keep their new value.
    pub fn relativize_paths<P: AsRef<Path>>(&mut self, out_dir: P) -> Result<()> {
        let out_dir = out_dir.as_ref();
        let out_dir = out_dir
            .absolutize()
            .map_err(|e| ManifestError::PathResolution {
                path: out_dir.display().to_string(),
                reason: e.to_string(),
            })?
            .into_owned();

        self.rewrite_relative_to(&out_dir)?;

        log::info!(
            "Rewrote {} files and {} directories relative to {}",
            self.files.items.len(),
            self.directories.len(),
            out_dir.display()
        );
        Ok(())
    }

    /// Rewrite every entry relative to `out_dir`, which must already be absolute.
    ///
    /// On Unix every absolutized entry shares the `/` root, so a relative
    /// `out_dir` is the only way to get a failure here. On Windows entries on
    /// another drive fail as well.
    fn rewrite_relative_to(&mut self, out_dir: &Path) -> Result<()> {
        for file in self.files.items.iter_mut() {
            *file = relative_entry(out_dir, file)?;
        }

        for dir in &self.directories {
            let rel = relative_entry(out_dir, dir)?;
            self.rel_dirs.push(rel);
        }

        for shortcut in self.shortcuts.items.iter_mut() {
            if !shortcut.icon.is_empty() {
                shortcut.icon = relative_entry(out_dir, &shortcut.icon)?;
            }
        }
        Ok(())
    }
}

fn relative_entry(out_dir: &Path, entry: &str) -> Result<String> {
    let resolution_error = |reason: String| ManifestError::PathResolution {
        path: entry.to_string(),
        reason,
    };

    let absolute = Path::new(entry)
        .absolutize()
        .map_err(|e| resolution_error(e.to_string()))?;

    let relative = relative_path(out_dir, &absolute).ok_or_else(|| {
        resolution_error(format!(
            "no relative path from {} to {}",
            out_dir.display(),
            absolute.display()
        ))
    })?;

    let relative = relative
        .into_os_string()
        .into_string()
        .map_err(|_| resolution_error("relative path is not valid UTF-8".to_string()))?;

    log::debug!("{} -> {}", entry, relative);
    Ok(relative)
}

/// Lexical path from `base` to `target`.
///
/// Both paths must be absolute and free of `.`/`..` components. Returns `"."`
/// when they are equal and `None` when they do not share a root (e.g. different
/// drives on Windows).
pub fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    if !base.is_absolute() || !target.is_absolute() {
        return None;
    }

    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();

    let root = |components: &[Component<'_>]| {
        components
            .iter()
            .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
            .count()
    };
    let base_root = root(&base);
    if base_root != root(&target) || base[..base_root] != target[..base_root] {
        return None;
    }

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component.as_os_str());
    }

    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_relative_path_descendant() {
        assert_eq!(
            relative_path(Path::new("/build/out"), Path::new("/build/out/sub/a.txt")),
            Some(PathBuf::from("sub/a.txt"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_path_same_directory() {
        assert_eq!(
            relative_path(Path::new("/build/out"), Path::new("/build/out")),
            Some(PathBuf::from("."))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_path_sibling_and_root() {
        assert_eq!(
            relative_path(Path::new("/build/out"), Path::new("/build/src/main.exe")),
            Some(PathBuf::from("../src/main.exe"))
        );
        assert_eq!(
            relative_path(Path::new("/build/out"), Path::new("/")),
            Some(PathBuf::from("../.."))
        );
    }

    #[test]
    fn test_relative_path_rejects_relative_input() {
        assert_eq!(relative_path(Path::new("out"), Path::new("a.txt")), None);
    }

    #[cfg(windows)]
    #[test]
    fn test_relative_path_different_drives() {
        assert_eq!(
            relative_path(Path::new(r"C:\build\out"), Path::new(r"D:\assets\a.txt")),
            None
        );
    }

    #[test]
    fn test_unresolvable_entry_stops_rewrite() {
        let mut manifest = Manifest::default();
        manifest.files.items = vec!["a.txt".to_string(), "b.txt".to_string()];
        manifest.directories.push("assets".to_string());

        let err = manifest
            .rewrite_relative_to(Path::new("build/out"))
            .unwrap_err();

        match err {
            ManifestError::PathResolution { path, reason } => {
                assert_eq!(path, "a.txt");
                assert!(reason.contains("no relative path"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(manifest.files.items, vec!["a.txt", "b.txt"]);
        assert!(manifest.rel_dirs.is_empty());
    }

    #[test]
    fn test_relative_entries_resolve_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();
        let mut manifest = Manifest::default();
        manifest.files.items.push(
            Path::new("sub")
                .join("a.txt")
                .to_string_lossy()
                .into_owned(),
        );
        manifest.directories.push("assets".to_string());

        manifest.relativize_paths(&cwd).unwrap();

        assert_eq!(
            PathBuf::from(&manifest.files.items[0]),
            Path::new("sub").join("a.txt")
        );
        assert_eq!(manifest.rel_dirs, vec!["assets".to_string()]);
        assert_eq!(manifest.directories, vec!["assets".to_string()]);
    }
}
