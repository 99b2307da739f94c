//! Test fixtures - ZIP archives and release payloads.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Build an in-memory ZIP from `(path, contents)` pairs.
///
/// Paths ending in `/` become directory entries. Entries are stored
/// uncompressed so the archive size tracks the payload size.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (path, contents) in entries {
        if path.ends_with('/') {
            writer.add_directory(*path, options).unwrap();
        } else {
            writer.start_file(*path, options).unwrap();
            writer.write_all(contents).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

/// Deterministic filler bytes, large enough to span several 8 KiB chunks.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Branch snapshot of `MyRepo` with the installer marker nested two levels deep.
pub fn repo_with_installer() -> Vec<u8> {
    let padding = payload(40_000);
    zip_archive(&[
        ("MyRepo-main/", b""),
        ("MyRepo-main/README.md", b"# MyRepo\n"),
        ("MyRepo-main/assets/blob.bin", &padding),
        ("MyRepo-main/sub/dir/InstallerReady.EXE", b"MZ"),
    ])
}

/// Branch snapshot of `MyRepo` without the installer marker.
pub fn repo_without_installer() -> Vec<u8> {
    zip_archive(&[
        ("MyRepo-main/", b""),
        ("MyRepo-main/README.md", b"# MyRepo\n"),
        ("MyRepo-main/src/main.rs", b"fn main() {}\n"),
    ])
}

/// Latest-release JSON listing the given `(name, url)` assets in order.
pub fn release_json(tag: &str, assets: &[(&str, &str)]) -> serde_json::Value {
    let assets: Vec<_> = assets
        .iter()
        .map(|(name, url)| serde_json::json!({"name": name, "browser_download_url": url}))
        .collect();
    serde_json::json!({"tag_name": tag, "assets": assets})
}
