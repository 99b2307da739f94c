//! Archive extraction
//!
//! Unpacks ZIP archives with the `zip` crate, no external tools needed.

use crate::core::output;
use crate::engine::FetchError;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// Extract a zip archive held in memory into `dest`.
///
/// See [`extract_zip`] for the extraction rules.
pub fn extract_zip_bytes(bytes: &[u8], dest: &Path) -> Result<usize, FetchError> {
    extract_zip(Cursor::new(bytes), dest)
}

/// Extract every entry of a zip archive into `dest`, preserving its layout.
///
/// Directories are created as needed and existing files are overwritten.
/// Entries whose names would land outside `dest` are skipped. Returns the
/// number of files written.
pub fn extract_zip<R: Read + Seek>(reader: R, dest: &Path) -> Result<usize, FetchError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut written = 0;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                output::debug(&format!("skipping unsafe zip entry: {}", file.name()));
                continue;
            }
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut outfile = std::fs::File::create(&outpath)?;
        std::io::copy(&mut file, &mut outfile)?;
        written += 1;

        // Set permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
            }
        }
    }

    output::debug(&format!("extracted {} files to {}", written, dest.display()));
    Ok(written)
}
