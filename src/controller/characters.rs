use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use tower_sessions::Session;

use crate::{
    error::{ingest::IngestError, Error},
    model::{
        api::{CharacterDto, CharacterPageDto, ErrorDto, UploadResultDto},
        app::AppState,
        query::{CharacterQuery, ListParams},
        session::SessionOwnerId,
    },
    service::{
        ingest::{IngestOutcome, IngestService},
        query::{CharacterPage, QueryService},
        trade::TradeService,
    },
};

pub static CHARACTERS_TAG: &str = "characters";

/// Uploads past this size are rejected before ingest runs.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

pub(crate) fn to_page_dto(page: CharacterPage) -> CharacterPageDto {
    CharacterPageDto {
        characters: page
            .characters
            .into_iter()
            .map(|view| CharacterDto {
                id: view.character.id,
                rank: view.character.rank,
                name: view.character.name,
                series: view.character.series,
                value: view.character.value,
                note: view.character.note,
                image: view.character.image,
                image_exists: view.image_exists,
                in_trade_list: view.character.in_trade_list,
            })
            .collect(),
        page: page.page,
        total_pages: page.total_pages,
        total: page.total,
    }
}

/// List the caller's characters with search, sorting, and pagination
#[utoipa::path(
    get,
    path = "/api/characters",
    tag = CHARACTERS_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "One page of the caller's characters", body = CharacterPageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_characters(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    let page = QueryService::new(&state.db, &state.media)
        .query(&owner_id, &params.into_query())
        .await?;

    Ok((StatusCode::OK, Json(to_page_dto(page))))
}

/// Upload a record set as a zip archive or raw JSON manifest
///
/// Accepts multipart form data with either a `zip_file` field (archive
/// containing `data.json` plus images) or a `json_file` field (raw manifest
/// with absolute image URLs). A request with neither field mutates nothing
/// and just returns the current view. Format and archive-safety failures are
/// reported in the response body alongside the caller's untouched record set.
#[utoipa::path(
    post,
    path = "/api/characters/upload",
    tag = CHARACTERS_TAG,
    responses(
        (status = 200, description = "Refreshed view, with the ingest outcome or a user-visible error", body = UploadResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_characters(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;
    let ingest_service = IngestService::new(&state.db, &state.media);

    enum UploadKind {
        Archive,
        Manifest,
    }

    let mut outcome: Option<Result<IngestOutcome, IngestError>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| IngestError::InvalidFormat(err.to_string()))?
    {
        let kind = match field.name() {
            Some("zip_file") => UploadKind::Archive,
            Some("json_file") => UploadKind::Manifest,
            _ => continue,
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|err| IngestError::InvalidFormat(err.to_string()))?;

        outcome = Some(match kind {
            UploadKind::Archive => ingest_service.ingest_archive(&owner_id, &bytes).await,
            UploadKind::Manifest => ingest_service.ingest_manifest(&owner_id, &bytes).await,
        });
        break;
    }

    let (records_created, error) = match outcome {
        Some(Ok(outcome)) => (Some(outcome.records_created), None),
        // Backing-store failures are generic 500s; the taxonomy below them
        // (bad format, unsafe archive) stays user-visible.
        Some(Err(err @ IngestError::StorageFailure(_))) => return Err(err.into()),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };

    let page = QueryService::new(&state.db, &state.media)
        .query(
            &owner_id,
            &CharacterQuery {
                page: 1,
                ..Default::default()
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(UploadResultDto {
            records_created,
            error,
            page: to_page_dto(page),
        }),
    ))
}

/// Non-POST requests to the upload path fall through to the query view
#[utoipa::path(
    get,
    path = "/api/characters/upload",
    tag = CHARACTERS_TAG,
    responses(
        (status = 200, description = "Current view, nothing mutated", body = UploadResultDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_view(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    let page = QueryService::new(&state.db, &state.media)
        .query(
            &owner_id,
            &CharacterQuery {
                page: 1,
                ..Default::default()
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(UploadResultDto {
            records_created: None,
            error: None,
            page: to_page_dto(page),
        }),
    ))
}

/// Delete every record the caller owns and return to the list view
#[utoipa::path(
    post,
    path = "/api/characters/clear",
    tag = CHARACTERS_TAG,
    responses(
        (status = 303, description = "Records cleared, redirected to the list view"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_all_characters(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let owner_id = SessionOwnerId::get_or_assign(&session).await?;

    TradeService::new(&state.db)
        .clear_all_records(&owner_id, &state.media)
        .await?;

    Ok(Redirect::to("/api/characters"))
}

/// Non-POST requests to the clear path redirect without mutating anything
#[utoipa::path(
    get,
    path = "/api/characters/clear",
    tag = CHARACTERS_TAG,
    responses(
        (status = 303, description = "Redirected to the list view")
    ),
)]
pub async fn clear_all_characters_redirect() -> impl IntoResponse {
    Redirect::to("/api/characters")
}
