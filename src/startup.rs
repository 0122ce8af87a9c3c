use sea_orm::DatabaseConnection;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{config::Config, error::Error, media::MediaStore};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Open the configured media root, or create an ephemeral one owned by the
/// returned store and removed when it drops at shutdown
pub fn build_media_store(config: &Config) -> Result<MediaStore, Error> {
    let media = match &config.media_root {
        Some(root) => MediaStore::persistent(root)?,
        None => MediaStore::ephemeral()?,
    };

    tracing::info!(root = %media.root().display(), "media root ready");

    Ok(media)
}

/// Configure cookie-session management over an in-process store
pub fn build_session_layer() -> SessionManagerLayer<MemoryStore> {
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry};

    let store = MemoryStore::default();

    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let development_mode = cfg!(debug_assertions);
    let secure_cookies = !development_mode;

    SessionManagerLayer::new(store)
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}
