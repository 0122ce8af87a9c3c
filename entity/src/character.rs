use sea_orm::entity::prelude::*;

/// One collectible character record, owned by exactly one tenant.
///
/// `sort_order` is assigned at ingest from the record's position in the
/// uploaded manifest and is immutable afterwards. `in_trade_list` is the only
/// field mutated outside a full-batch replace.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub owner_id: String,
    pub rank: String,
    pub name: String,
    pub series: String,
    pub value: String,
    #[sea_orm(column_type = "Text")]
    pub note: String,
    pub image: String,
    pub sort_order: i32,
    pub in_trade_list: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
