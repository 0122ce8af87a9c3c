use serde::Deserialize;
use utoipa::IntoParams;

/// Sort modes for the character list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending by `sort_order`, the original manifest order.
    #[default]
    Default,
    /// Ascending by the numeric rank parsed from strings like `"#1,275"`.
    Rank,
    /// Descending by the numeric kakera value parsed from strings like `"170 ka"`.
    Kakera,
}

impl SortMode {
    /// Unknown or absent values degrade to the default order rather than
    /// failing the request.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("rank") => Self::Rank,
            Some("kakera") => Self::Kakera,
            _ => Self::Default,
        }
    }
}

/// Normalized query for one owner's record set.
#[derive(Debug, Clone, Default)]
pub struct CharacterQuery {
    pub search: Option<String>,
    pub sort: SortMode,
    pub trade_list_only: bool,
    /// Requested 1-indexed page, clamped to the valid range by the service.
    pub page: u64,
}

/// Raw list-view query parameters.
///
/// Everything is optional and tolerant: a non-numeric `page` resolves to page
/// 1 and an unknown `sort_by` to the default order, matching the clamping
/// policy for malformed parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListParams {
    pub search: Option<String>,
    /// One of `default`, `rank`, `kakera`.
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub trade_list_only: Option<String>,
}

impl ListParams {
    pub fn into_query(self) -> CharacterQuery {
        CharacterQuery {
            search: self.search.filter(|s| !s.is_empty()),
            sort: SortMode::parse(self.sort_by.as_deref()),
            trade_list_only: self
                .trade_list_only
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            page: self
                .page
                .and_then(|p| p.parse::<u64>().ok())
                .filter(|&p| p >= 1)
                .unwrap_or(1),
        }
    }
}
