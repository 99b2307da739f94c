//! Common filesystem utilities
//!
//! Directory scans used after an archive has been unpacked.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find the first immediate child directory of `dir` whose name contains
/// `needle`, ignoring case.
///
/// Children are visited in directory-listing order, so "first" is whatever
/// the filesystem returns first.
pub fn find_child_dir_containing(dir: &Path, needle: &str) -> std::io::Result<Option<PathBuf>> {
    let needle = needle.to_lowercase();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if name.contains(&needle) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Walk `root` recursively and return the first regular file named `file_name`,
/// ignoring case.
///
/// A symlink counts when it points at a regular file. Unreadable entries are
/// skipped rather than failing the scan.
pub fn find_file_ignore_case(root: &Path, file_name: &str) -> Option<PathBuf> {
    let wanted = file_name.to_lowercase();

    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .find(|e| e.file_name().to_string_lossy().to_lowercase() == wanted)
        .map(|e| e.into_path())
}
