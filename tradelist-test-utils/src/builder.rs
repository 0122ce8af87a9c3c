//! Declarative test builder.
//!
//! Configuration methods queue tables and fixtures; everything executes
//! during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_character_table: bool,
    // (owner_id, record count) batches inserted during build()
    owner_characters: Vec<(String, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_character_table: false,
            owner_characters: Vec::new(),
        }
    }

    /// Create the character table in the test database.
    pub fn with_character_table(mut self) -> Self {
        self.include_character_table = true;
        self
    }

    /// Create a custom entity table in the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert `count` mock characters for `owner_id`, with `sort_order`
    /// 0..count. Implies the character table.
    pub fn with_owner_characters(mut self, owner_id: &str, count: usize) -> Self {
        self.include_character_table = true;
        self.owner_characters.push((owner_id.to_string(), count));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        let mut tables = self.tables;
        if self.include_character_table {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            tables.insert(0, schema.create_table_from_entity(entity::prelude::Character));
        }
        context.with_tables(tables).await?;

        for (owner_id, count) in self.owner_characters {
            context
                .characters()
                .insert_mock_characters(&owner_id, count)
                .await?;
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
