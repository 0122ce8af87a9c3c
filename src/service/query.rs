//! Owner-scoped character queries: search, sort, clamped pagination, and the
//! derived image-availability flag.

use std::cmp::Reverse;

use sea_orm::DatabaseConnection;

use crate::{
    data::character::CharacterRepository,
    error::Error,
    media::MediaStore,
    model::{
        image::ImageRef,
        query::{CharacterQuery, SortMode},
    },
};

pub const PAGE_SIZE: u64 = 10;

#[derive(Debug)]
pub struct CharacterView {
    pub character: entity::character::Model,
    pub image_exists: bool,
}

#[derive(Debug)]
pub struct CharacterPage {
    pub characters: Vec<CharacterView>,
    pub page: u64,
    pub total_pages: u64,
    pub total: u64,
}

pub struct QueryService<'a> {
    db: &'a DatabaseConnection,
    media: &'a MediaStore,
}

impl<'a> QueryService<'a> {
    pub fn new(db: &'a DatabaseConnection, media: &'a MediaStore) -> Self {
        Self { db, media }
    }

    /// Serve one page of the owner's records.
    ///
    /// Sorting and pagination run here, over the filtered set, so the
    /// unparsable-rank fallback is one defined rule instead of whatever the
    /// backing store's CAST does. A page past the end clamps to the last
    /// valid page; an empty set serves page 1 of 1.
    pub async fn query(
        &self,
        owner_id: &str,
        query: &CharacterQuery,
    ) -> Result<CharacterPage, Error> {
        let mut records = CharacterRepository::new(self.db)
            .list_for_owner(owner_id, query.search.as_deref(), query.trade_list_only)
            .await?;

        // Records arrive in sort_order; both re-sorts are stable, so ties
        // keep the default order.
        match query.sort {
            SortMode::Default => {}
            SortMode::Rank => {
                records.sort_by_key(|record| match rank_key(&record.rank) {
                    Some(rank) => (false, rank),
                    None => (true, 0),
                });
            }
            SortMode::Kakera => {
                records.sort_by_key(|record| Reverse(kakera_value(&record.value)));
            }
        }

        let total = records.len() as u64;
        let total_pages = total.div_ceil(PAGE_SIZE).max(1);
        let page = query.page.clamp(1, total_pages);

        let offset = ((page - 1) * PAGE_SIZE) as usize;
        let characters = records
            .into_iter()
            .skip(offset)
            .take(PAGE_SIZE as usize)
            .map(|character| {
                let image_exists = self.image_exists(&character.image);

                CharacterView {
                    character,
                    image_exists,
                }
            })
            .collect();

        Ok(CharacterPage {
            characters,
            page,
            total_pages,
            total,
        })
    }

    fn image_exists(&self, image: &str) -> bool {
        match ImageRef::parse(image) {
            ImageRef::Url(_) => true,
            ImageRef::LocalPath(path) => self.media.exists(&path),
            ImageRef::Absent => false,
        }
    }
}

/// Numeric rank from display strings like `"#1,275"`. `None` when the
/// remainder is not an integer; such records sort after every parsable rank.
fn rank_key(rank: &str) -> Option<i64> {
    let cleaned: String = rank
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned.parse().ok()
}

/// Numeric kakera from display strings like `"170 ka"`. Unparsable values
/// count as 0 and therefore sort last in the descending order.
fn kakera_value(value: &str) -> i64 {
    let cleaned: String = value
        .trim()
        .trim_end_matches(" ka")
        .chars()
        .filter(|c| *c != ',')
        .collect();

    cleaned.parse().unwrap_or(0)
}
