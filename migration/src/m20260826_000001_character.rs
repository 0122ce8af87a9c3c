use sea_orm_migration::{prelude::*, schema::*};

static IDX_CHARACTER_OWNER_ID: &str = "idx_character_owner_id";
static IDX_CHARACTER_OWNER_ID_SORT_ORDER: &str = "idx_character_owner_id_sort_order";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Character::Table)
                    .if_not_exists()
                    .col(pk_auto(Character::Id))
                    .col(string(Character::OwnerId))
                    .col(string(Character::Rank))
                    .col(string(Character::Name))
                    .col(string(Character::Series))
                    .col(string(Character::Value))
                    .col(text(Character::Note))
                    .col(string(Character::Image))
                    .col(integer(Character::SortOrder))
                    .col(boolean(Character::InTradeList))
                    .col(timestamp(Character::CreatedAt))
                    .col(timestamp(Character::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_OWNER_ID)
                    .table(Character::Table)
                    .col(Character::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHARACTER_OWNER_ID_SORT_ORDER)
                    .table(Character::Table)
                    .col(Character::OwnerId)
                    .col(Character::SortOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_OWNER_ID_SORT_ORDER)
                    .table(Character::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHARACTER_OWNER_ID)
                    .table(Character::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Character::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Character {
    Table,
    Id,
    OwnerId,
    Rank,
    Name,
    Series,
    Value,
    Note,
    Image,
    SortOrder,
    InTradeList,
    CreatedAt,
    UpdatedAt,
}
