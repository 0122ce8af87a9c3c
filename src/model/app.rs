use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::media::MediaStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub media: MediaStore,
}

/// Conversion used by the test-utils crate to build an `AppState` without a
/// circular dependency on this crate.
impl From<(DatabaseConnection, PathBuf)> for AppState {
    fn from((db, media_root): (DatabaseConnection, PathBuf)) -> Self {
        let media = MediaStore::persistent(&media_root)
            .expect("failed to open media root for app state");

        Self { db, media }
    }
}
