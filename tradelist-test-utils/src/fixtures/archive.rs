use std::io::{Cursor, Write};

use zip::{write::SimpleFileOptions, ZipWriter};

use crate::error::TestError;

/// Build a zip archive from raw (entry name, bytes) pairs. Entry names are
/// written verbatim, so tests can produce hostile names like `../escape`.
pub fn archive_with_entries(entries: &[(&str, &[u8])]) -> Result<Vec<u8>, TestError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, bytes) in entries {
        writer.start_file(*name, SimpleFileOptions::default())?;
        writer.write_all(bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Build an upload archive with a `data.json` manifest plus image files.
pub fn archive_with_manifest(
    manifest: &[u8],
    images: &[(&str, &[u8])],
) -> Result<Vec<u8>, TestError> {
    let mut entries = vec![("data.json", manifest)];
    entries.extend_from_slice(images);

    archive_with_entries(&entries)
}
