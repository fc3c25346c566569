use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{Result, StageError};

/// Two-level discovery for pattern rows: the pattern prefix-matches immediate
/// subdirectories of the media root (multiple mounted images can share a
/// release-name prefix), then the mask matches names recursively beneath, at
/// any depth. Matching is case-sensitive. A missing media root (no image
/// mounted at all) and unreadable entries mean "nothing matched", never a
/// fatal error; the row is reported as no-match and the run continues.
pub fn discover_pattern(media_root: &Path, pattern: &str, mask: &str) -> Result<Vec<PathBuf>> {
    let mask = compile_mask(mask)?;
    let entries = match fs::read_dir(media_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("search root {} does not exist", media_root.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(pattern) {
            continue;
        }
        for item in WalkDir::new(&path).min_depth(1) {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    warn!("walk {}: {}", path.display(), e);
                    continue;
                }
            };
            if mask.matches(&item.file_name().to_string_lossy()) {
                found.push(item.into_path());
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Flat discovery for empty-pattern rows: the mask matches names directly
/// under the backup share root, no recursion.
pub fn discover_flat(backup_root: &Path, mask: &str) -> Result<Vec<PathBuf>> {
    let mask = compile_mask(mask)?;
    let entries = match fs::read_dir(backup_root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("search root {} does not exist", backup_root.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry?;
        if mask.matches(&entry.file_name().to_string_lossy()) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

fn compile_mask(mask: &str) -> Result<Pattern> {
    Pattern::new(mask).map_err(|e| StageError::message(format!("invalid mask {}: {}", mask, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        File::create(path).expect("touch");
    }

    #[test]
    fn pattern_matches_prefixed_top_level_dirs_recursively() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        touch(&root.join("REL-1.0/boot/kernel.bin"));
        touch(&root.join("REL-2.0/extras/firmware/blob.bin"));
        touch(&root.join("REL-2.0/readme.txt"));
        touch(&root.join("OTHER/stray.bin"));
        touch(&root.join("toplevel.bin"));

        let found = discover_pattern(root, "REL", "*.bin").expect("discover");
        assert_eq!(
            found,
            vec![
                root.join("REL-1.0/boot/kernel.bin"),
                root.join("REL-2.0/extras/firmware/blob.bin"),
            ]
        );
    }

    #[test]
    fn mask_matches_directly_under_the_prefix_dir() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        touch(&root.join("REL-1.0/image.bin"));

        let found = discover_pattern(root, "REL", "*.bin").expect("discover");
        assert_eq!(found, vec![root.join("REL-1.0/image.bin")]);
    }

    #[test]
    fn pattern_match_is_case_sensitive() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        touch(&root.join("rel-1.0/a.bin"));

        let found = discover_pattern(root, "REL", "*.bin").expect("discover");
        assert!(found.is_empty());
    }

    #[test]
    fn matching_directories_are_discovered_too() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        touch(&root.join("REL-1.0/drivers.d/inner.txt"));

        let found = discover_pattern(root, "REL", "*.d").expect("discover");
        assert_eq!(found, vec![root.join("REL-1.0/drivers.d")]);
    }

    #[test]
    fn missing_media_root_yields_no_matches() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("media");

        let found = discover_pattern(&missing, "REL", "*.bin").expect("discover");
        assert!(found.is_empty());
    }

    #[test]
    fn missing_backup_root_yields_no_matches() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("backup");

        let found = discover_flat(&missing, "archive-*.tar").expect("discover");
        assert!(found.is_empty());
    }

    #[test]
    fn flat_discovery_does_not_recurse() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        touch(&root.join("archive-1.tar"));
        touch(&root.join("archive-2.tar"));
        touch(&root.join("nested/archive-3.tar"));
        touch(&root.join("notes.txt"));

        let found = discover_flat(root, "archive-*.tar").expect("discover");
        assert_eq!(
            found,
            vec![root.join("archive-1.tar"), root.join("archive-2.tar")]
        );
    }

    #[test]
    fn invalid_mask_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        assert!(discover_flat(tmp.path(), "[").is_err());
    }
}
