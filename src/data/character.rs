use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ExprTrait,
    QueryFilter, QueryOrder, TransactionError, TransactionTrait,
};

/// Fields of a record about to be inserted by ingest. `sort_order` is not
/// here on purpose: it is assigned from the batch position during the
/// replace, never by callers.
#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub rank: String,
    pub name: String,
    pub series: String,
    pub value: String,
    pub note: String,
    pub image: String,
}

/// Escape `LIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

pub struct CharacterRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CharacterRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomically replace the owner's record set with `characters`.
    ///
    /// Delete and insert run inside one transaction: a concurrent reader sees
    /// either the fully-old or fully-new set, and any insert failure rolls
    /// back to the pre-ingest state. `sort_order` is assigned 0..N-1 in batch
    /// order.
    pub async fn replace_for_owner(
        &self,
        owner_id: &str,
        characters: Vec<NewCharacter>,
    ) -> Result<u64, DbErr> {
        let owner_id = owner_id.to_string();

        self.db
            .transaction::<_, u64, DbErr>(move |txn| {
                Box::pin(async move {
                    entity::prelude::Character::delete_many()
                        .filter(entity::character::Column::OwnerId.eq(&owner_id))
                        .exec(txn)
                        .await?;

                    let mut records_created = 0;
                    for (sort_order, character) in characters.into_iter().enumerate() {
                        let now = Utc::now().naive_utc();

                        entity::character::ActiveModel {
                            owner_id: ActiveValue::Set(owner_id.clone()),
                            rank: ActiveValue::Set(character.rank),
                            name: ActiveValue::Set(character.name),
                            series: ActiveValue::Set(character.series),
                            value: ActiveValue::Set(character.value),
                            note: ActiveValue::Set(character.note),
                            image: ActiveValue::Set(character.image),
                            sort_order: ActiveValue::Set(sort_order as i32),
                            in_trade_list: ActiveValue::Set(false),
                            created_at: ActiveValue::Set(now),
                            updated_at: ActiveValue::Set(now),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;

                        records_created += 1;
                    }

                    Ok(records_created)
                })
            })
            .await
            .map_err(|err| match err {
                TransactionError::Connection(err) => err,
                TransactionError::Transaction(err) => err,
            })
    }

    /// The owner's records in `sort_order`, optionally filtered by a
    /// case-insensitive name substring and by trade-list membership.
    pub async fn list_for_owner(
        &self,
        owner_id: &str,
        search: Option<&str>,
        trade_list_only: bool,
    ) -> Result<Vec<entity::character::Model>, DbErr> {
        let mut query = entity::prelude::Character::find()
            .filter(entity::character::Column::OwnerId.eq(owner_id));

        if let Some(search) = search {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(entity::character::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", escape_like(&search.to_lowercase()))).escape('\\')),
            );
        }

        if trade_list_only {
            query = query.filter(entity::character::Column::InTradeList.eq(true));
        }

        query
            .order_by_asc(entity::character::Column::SortOrder)
            .all(self.db)
            .await
    }

    pub async fn get_for_owner(
        &self,
        owner_id: &str,
        character_id: i32,
    ) -> Result<Option<entity::character::Model>, DbErr> {
        entity::prelude::Character::find_by_id(character_id)
            .filter(entity::character::Column::OwnerId.eq(owner_id))
            .one(self.db)
            .await
    }

    /// Flip the trade-list flag on one record scoped to the owner. Returns
    /// `None` both when the record does not exist and when it belongs to
    /// another owner, so existence never leaks across tenants.
    pub async fn toggle_trade_list(
        &self,
        owner_id: &str,
        character_id: i32,
    ) -> Result<Option<entity::character::Model>, DbErr> {
        let character = match self.get_for_owner(owner_id, character_id).await? {
            Some(character) => character,
            None => return Ok(None),
        };

        let in_trade_list = !character.in_trade_list;
        let mut character: entity::character::ActiveModel = character.into();
        character.in_trade_list = ActiveValue::Set(in_trade_list);
        character.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let character = character.update(self.db).await?;

        Ok(Some(character))
    }

    /// Delete every record owned by the caller, returning the deleted count.
    pub async fn clear_all(&self, owner_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Character::delete_many()
            .filter(entity::character::Column::OwnerId.eq(owner_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Unset the trade-list flag on every flagged record the caller owns
    /// without deleting anything.
    pub async fn clear_trade_list(&self, owner_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Character::update_many()
            .col_expr(entity::character::Column::InTradeList, Expr::value(false))
            .filter(entity::character::Column::OwnerId.eq(owner_id))
            .filter(entity::character::Column::InTradeList.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count_for_owner(&self, owner_id: &str) -> Result<u64, DbErr> {
        use sea_orm::PaginatorTrait;

        entity::prelude::Character::find()
            .filter(entity::character::Column::OwnerId.eq(owner_id))
            .count(self.db)
            .await
    }
}
