//! Upload ingest pipeline: validate the payload, then atomically replace the
//! owner's record set.

pub mod archive;

use std::{fs, io::Cursor, path::Path};

use sea_orm::DatabaseConnection;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::{
    data::character::{CharacterRepository, NewCharacter},
    error::ingest::IngestError,
    media::MediaStore,
    model::{
        image::ImageRef,
        manifest::{Manifest, ManifestCharacter},
    },
};

pub const MANIFEST_NAME: &str = "data.json";

#[derive(Debug)]
pub struct IngestOutcome {
    pub records_created: u64,
}

pub struct IngestService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaStore,
}

impl<'a> IngestService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaStore) -> Self {
        Self { db, media }
    }

    /// Ingest a zip archive containing `data.json` plus image files.
    ///
    /// Every entry is validated before anything is written. Images are
    /// relocated into the media store under `<owner_id>/<basename>` and each
    /// record's image field is rewritten to that relative path. The
    /// extraction working directory is removed on every exit path; a cleanup
    /// failure never masks the ingest result.
    pub async fn ingest_archive(
        &self,
        owner_id: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, IngestError> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        archive::validate(&mut zip)?;

        let workdir = tempfile::Builder::new()
            .prefix("tradelist_ingest_")
            .tempdir()?;
        archive::extract(&mut zip, workdir.path())?;

        let manifest_path = workdir.path().join(MANIFEST_NAME);
        if !manifest_path.is_file() {
            return Err(IngestError::InvalidFormat(format!(
                "archive contains no {MANIFEST_NAME}"
            )));
        }
        let manifest: Manifest = serde_json::from_slice(&fs::read(&manifest_path)?)?;

        // Drop the previous upload's images first so the media area mirrors
        // the replaced record set instead of accumulating stale files.
        if let Err(err) = self.media.delete_owner(owner_id) {
            tracing::warn!(owner_id, "failed to clear previous owner media: {err}");
        }
        self.relocate_images(owner_id, workdir.path())?;

        let characters = manifest
            .characters
            .into_iter()
            .map(|character| to_new_character(character, Some(owner_id)))
            .collect();

        let records_created = CharacterRepository::new(self.db)
            .replace_for_owner(owner_id, characters)
            .await?;

        tracing::info!(owner_id, records_created, "ingested archive upload");

        Ok(IngestOutcome { records_created })
    }

    /// Ingest a raw JSON manifest whose image fields are already absolute
    /// URLs, stored verbatim with no file movement.
    pub async fn ingest_manifest(
        &self,
        owner_id: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, IngestError> {
        let manifest: Manifest = serde_json::from_slice(bytes)?;

        let characters = manifest
            .characters
            .into_iter()
            .map(|character| to_new_character(character, None))
            .collect();

        let records_created = CharacterRepository::new(self.db)
            .replace_for_owner(owner_id, characters)
            .await?;

        tracing::info!(owner_id, records_created, "ingested manifest upload");

        Ok(IngestOutcome { records_created })
    }

    /// Move every extracted image into the owner's media area, flattened to
    /// its base name. Directory components from the archive are discarded.
    fn relocate_images(&self, owner_id: &str, extract_root: &Path) -> Result<(), IngestError> {
        for entry in WalkDir::new(extract_root) {
            let entry = entry.map_err(|err| IngestError::StorageFailure(err.to_string()))?;

            if !entry.file_type().is_file() || !archive::is_image_file(entry.path()) {
                continue;
            }

            let Some(basename) = entry.path().file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            let bytes = fs::read(entry.path())?;
            self.media.put(&format!("{owner_id}/{basename}"), &bytes)?;
        }

        Ok(())
    }
}

/// Map a manifest entry to an insertable record. For archive uploads a local
/// image path is rewritten to the owner's media area, keyed by base name
/// only; URLs and raw-manifest images are stored verbatim.
fn to_new_character(character: ManifestCharacter, relocate_owner: Option<&str>) -> NewCharacter {
    let image = match relocate_owner {
        Some(owner_id) if matches!(ImageRef::parse(&character.image), ImageRef::LocalPath(_)) => {
            match Path::new(&character.image)
                .file_name()
                .and_then(|name| name.to_str())
            {
                Some(basename) => format!("{owner_id}/{basename}"),
                None => String::new(),
            }
        }
        _ => character.image,
    };

    NewCharacter {
        rank: character.rank,
        name: character.name,
        series: character.series,
        value: character.value,
        note: character.note,
        image,
    }
}
