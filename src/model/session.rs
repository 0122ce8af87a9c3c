use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::Error;

pub const SESSION_OWNER_ID_KEY: &str = "tradelist:owner:id";

/// Opaque per-session tenant identity.
///
/// There is no login flow; the session cookie is the tenant boundary. An
/// owner id is assigned on first use and every record operation is scoped to
/// it.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionOwnerId(pub String);

impl SessionOwnerId {
    /// Insert owner ID into session
    pub async fn insert(session: &Session, owner_id: &str) -> Result<(), Error> {
        session
            .insert(SESSION_OWNER_ID_KEY, SessionOwnerId(owner_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get owner ID from session
    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        Ok(session
            .get::<SessionOwnerId>(SESSION_OWNER_ID_KEY)
            .await?
            .map(|SessionOwnerId(id)| id))
    }

    /// Get owner ID from session, assigning a fresh one for first-time visitors
    pub async fn get_or_assign(session: &Session) -> Result<String, Error> {
        if let Some(owner_id) = Self::get(session).await? {
            return Ok(owner_id);
        }

        let owner_id = Uuid::new_v4().to_string();
        Self::insert(session, &owner_id).await?;

        Ok(owner_id)
    }
}
