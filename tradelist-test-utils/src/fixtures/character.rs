use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use serde_json::{json, Value};

use crate::error::TestError;

/// Fully specified row for insertion; use [`CharacterSeed::mock`] for a
/// plausible default.
#[derive(Debug, Clone)]
pub struct CharacterSeed {
    pub owner_id: String,
    pub rank: String,
    pub name: String,
    pub series: String,
    pub value: String,
    pub note: String,
    pub image: String,
    pub sort_order: i32,
    pub in_trade_list: bool,
}

impl CharacterSeed {
    pub fn mock(owner_id: &str, sort_order: i32) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            rank: format!("#{}", sort_order + 1),
            name: format!("Character {sort_order}"),
            series: "Test Series".to_string(),
            value: format!("{} ka", 100 + sort_order * 10),
            note: String::new(),
            image: String::new(),
            sort_order,
            in_trade_list: false,
        }
    }
}

pub struct CharacterFixtures<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterFixtures<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, seed: CharacterSeed) -> Result<entity::character::Model, TestError> {
        let now = Utc::now().naive_utc();

        let character = entity::character::ActiveModel {
            owner_id: ActiveValue::Set(seed.owner_id),
            rank: ActiveValue::Set(seed.rank),
            name: ActiveValue::Set(seed.name),
            series: ActiveValue::Set(seed.series),
            value: ActiveValue::Set(seed.value),
            note: ActiveValue::Set(seed.note),
            image: ActiveValue::Set(seed.image),
            sort_order: ActiveValue::Set(seed.sort_order),
            in_trade_list: ActiveValue::Set(seed.in_trade_list),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(character)
    }

    pub async fn insert_mock_characters(
        &self,
        owner_id: &str,
        count: usize,
    ) -> Result<Vec<entity::character::Model>, TestError> {
        let mut characters = Vec::with_capacity(count);

        for sort_order in 0..count {
            characters.push(self.insert(CharacterSeed::mock(owner_id, sort_order as i32)).await?);
        }

        Ok(characters)
    }
}

/// One manifest entry in the upload wire format.
pub fn manifest_entry(rank: &str, name: &str, series: &str, value: &str, image: &str) -> Value {
    json!({
        "rank": rank,
        "name": name,
        "series": series,
        "value": value,
        "note": "",
        "image": image,
    })
}

/// Serialized `{"characters": [...]}` manifest.
pub fn manifest_bytes(entries: &[Value]) -> Vec<u8> {
    json!({ "characters": entries }).to_string().into_bytes()
}
