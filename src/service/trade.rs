//! Trade-list mutation operations: single-record toggles and the two bulk
//! clears. None of these touch `sort_order` or record identity except
//! `clear_all_records`, which removes the whole set.

use sea_orm::DatabaseConnection;

use crate::{data::character::CharacterRepository, error::Error, media::MediaStore};

pub struct TradeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TradeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Flip trade-list membership on one record. `None` covers both a
    /// missing record and one owned by another tenant.
    pub async fn toggle_trade_list(
        &self,
        owner_id: &str,
        character_id: i32,
    ) -> Result<Option<entity::character::Model>, Error> {
        let character = CharacterRepository::new(self.db)
            .toggle_trade_list(owner_id, character_id)
            .await?;

        Ok(character)
    }

    /// Delete every record the caller owns, along with their stored images.
    /// A media cleanup failure is logged but does not fail the operation;
    /// the records are already gone.
    pub async fn clear_all_records(&self, owner_id: &str, media: &MediaStore) -> Result<u64, Error> {
        let deleted = CharacterRepository::new(self.db).clear_all(owner_id).await?;

        if let Err(err) = media.delete_owner(owner_id) {
            tracing::warn!(owner_id, "failed to remove owner media: {err}");
        }

        tracing::info!(owner_id, deleted, "cleared all records");

        Ok(deleted)
    }

    /// Remove every record from the caller's trade list without deleting
    /// anything.
    pub async fn clear_trade_list(&self, owner_id: &str) -> Result<u64, Error> {
        let cleared = CharacterRepository::new(self.db)
            .clear_trade_list(owner_id)
            .await?;

        tracing::info!(owner_id, cleared, "cleared trade list");

        Ok(cleared)
    }
}
