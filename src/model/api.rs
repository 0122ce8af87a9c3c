use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
    pub message: String,
}

/// One character record as served to clients.
///
/// `image_exists` is derived per request and never persisted: URLs are
/// trusted, local paths are checked against the media store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CharacterDto {
    pub id: i32,
    pub rank: String,
    pub name: String,
    pub series: String,
    pub value: String,
    pub note: String,
    pub image: String,
    pub image_exists: bool,
    pub in_trade_list: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CharacterPageDto {
    pub characters: Vec<CharacterDto>,
    /// 1-indexed page actually served, after clamping.
    pub page: u64,
    pub total_pages: u64,
    /// Matching-record count before pagination.
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResultDto {
    /// Set on a successful ingest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records_created: Option<u64>,
    /// User-visible ingest failure message; the page below still reflects the
    /// owner's prior, untouched record set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub page: CharacterPageDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleTradeListDto {
    pub status: String,
    pub in_trade_list: bool,
    pub character_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleErrorDto {
    pub status: String,
    pub message: String,
}
