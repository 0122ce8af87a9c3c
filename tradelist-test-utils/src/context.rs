//! Test context structure and utilities.
//!
//! The context returned by `TestBuilder` bundles an in-memory SQLite
//! database, a session on a memory store, and a temporary media root that is
//! removed when the context drops.

use std::{path::PathBuf, sync::Arc};

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;
use tower_sessions::{MemoryStore, Session};

use crate::{error::TestError, fixtures::character::CharacterFixtures};

/// Test environment shared by unit and integration tests.
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder)
/// rather than constructing it directly.
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session over an in-process memory store
    pub session: Session,
    /// Temporary media root, deleted when the context drops
    pub media_root: TempDir,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        let media_root = tempfile::Builder::new()
            .prefix("tradelist_test_media_")
            .tempdir()?;

        Ok(TestContext {
            db,
            session,
            media_root,
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Convert the database and media root into any type constructible from
    /// them. This allows building the server's `AppState` without a circular
    /// dependency between the test-utils crate and the tradelist crate.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, PathBuf)>,
    {
        T::from((self.db.clone(), self.media_root.path().to_path_buf()))
    }

    /// Character fixture helpers bound to this context's database.
    pub fn characters(&self) -> CharacterFixtures<'_> {
        CharacterFixtures::new(&self.db)
    }
}
