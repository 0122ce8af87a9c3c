use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    error::Error,
    model::{
        api::{CharacterPageDto, ErrorDto, ToggleErrorDto, ToggleTradeListDto},
        app::AppState,
        query::{ListParams, SortMode},
        session::SessionOwnerId,
    },
    service::{query::QueryService, trade::TradeService},
};

use super::characters::to_page_dto;

pub static TRADE_LIST_TAG: &str = "trade_list";

#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleForm {
    pub character_id: Option<String>,
}

/// List the caller's trade-listed characters with search and pagination
///
/// Always ordered by the original manifest order; the trade list has no
/// alternate sort modes.
#[utoipa::path(
    get,
    path = "/api/trade_list",
    tag = TRADE_LIST_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "One page of the caller's trade list", body = CharacterPageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn trade_list(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    let mut query = params.into_query();
    query.trade_list_only = true;
    query.sort = SortMode::Default;

    let page = QueryService::new(&state.db, &state.media)
        .query(&owner_id, &query)
        .await?;

    Ok((StatusCode::OK, Json(to_page_dto(page))))
}

/// Toggle trade-list membership for one character
///
/// Responds with the same not-found error whether the record is missing or
/// owned by another tenant.
#[utoipa::path(
    post,
    path = "/api/trade_list/toggle",
    tag = TRADE_LIST_TAG,
    request_body(content = ToggleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Membership flipped", body = ToggleTradeListDto),
        (status = 400, description = "Missing or malformed character_id", body = ToggleErrorDto),
        (status = 404, description = "Character not found", body = ToggleErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn toggle_trade_list(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ToggleForm>,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    let character_id = match form
        .character_id
        .as_deref()
        .and_then(|raw| raw.parse::<i32>().ok())
    {
        Some(character_id) => character_id,
        None => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ToggleErrorDto {
                    status: "error".to_string(),
                    message: "Invalid request".to_string(),
                }),
            )
                .into_response())
        }
    };

    let character = TradeService::new(&state.db)
        .toggle_trade_list(&owner_id, character_id)
        .await?;

    match character {
        Some(character) => Ok((
            StatusCode::OK,
            Json(ToggleTradeListDto {
                status: "success".to_string(),
                in_trade_list: character.in_trade_list,
                character_name: character.name,
            }),
        )
            .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ToggleErrorDto {
                status: "error".to_string(),
                message: "Character not found".to_string(),
            }),
        )
            .into_response()),
    }
}

/// Remove every character from the caller's trade list
#[utoipa::path(
    post,
    path = "/api/trade_list/clear",
    tag = TRADE_LIST_TAG,
    responses(
        (status = 303, description = "Trade list cleared, redirected to the trade list view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_trade_list(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    TradeService::new(&state.db).clear_trade_list(&owner_id).await?;

    Ok(Redirect::to("/api/trade_list"))
}

/// Non-POST requests to the clear path redirect without mutating anything
#[utoipa::path(
    get,
    path = "/api/trade_list/clear",
    tag = TRADE_LIST_TAG,
    responses(
        (status = 303, description = "Redirected to the trade list view")
    ),
)]
pub async fn clear_trade_list_redirect() -> impl IntoResponse {
    Redirect::to("/api/trade_list")
}
