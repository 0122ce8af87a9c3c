use std::{
    fs::{self, File},
    io::{Read, Seek},
    path::Path,
};

use zip::ZipArchive;

use crate::error::ingest::IngestError;

/// Bounds on hostile archives, checked before anything is written.
pub const MAX_ARCHIVE_ENTRIES: usize = 10_000;
pub const MAX_UNCOMPRESSED_BYTES: u64 = 512 * 1024 * 1024;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Validate every entry of the archive before extraction.
///
/// Rejects the whole upload if any entry name resolves outside the extraction
/// root (zip-slip), or if the archive exceeds the entry-count or total
/// uncompressed-size bounds. Runs strictly before any file is written, so a
/// rejected upload has no partial extraction to clean up.
pub fn validate<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<(), IngestError> {
    if archive.len() > MAX_ARCHIVE_ENTRIES {
        return Err(IngestError::InvalidFormat(format!(
            "archive has {} entries, limit is {MAX_ARCHIVE_ENTRIES}",
            archive.len()
        )));
    }

    let mut total_bytes: u64 = 0;
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;

        if entry.enclosed_name().is_none() {
            return Err(IngestError::UnsafeArchive(entry.name().to_string()));
        }

        total_bytes = total_bytes.saturating_add(entry.size());
        if total_bytes > MAX_UNCOMPRESSED_BYTES {
            return Err(IngestError::InvalidFormat(format!(
                "archive expands past the {MAX_UNCOMPRESSED_BYTES} byte limit"
            )));
        }
    }

    Ok(())
}

/// Extract a pre-validated archive under `root`.
pub fn extract<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    root: &Path,
) -> Result<(), IngestError> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;

        let relative = match entry.enclosed_name() {
            Some(relative) => relative,
            None => return Err(IngestError::UnsafeArchive(entry.name().to_string())),
        };
        let dest = root.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&dest)?;
        std::io::copy(&mut entry, &mut out)?;
    }

    Ok(())
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
