use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{error::InternalServerError, model::api::ErrorDto};

/// Failure modes of the upload ingest pipeline.
///
/// Each variant leaves the owner's prior record set untouched; the ingest
/// service only commits the replace once the whole payload has validated.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The payload is not a readable archive or manifest, or the manifest is
    /// missing its `characters` list.
    #[error("Invalid upload format: {0}")]
    InvalidFormat(String),
    /// An archive entry would resolve outside the extraction root (zip-slip).
    #[error("Archive entry {0:?} resolves outside the extraction root")]
    UnsafeArchive(String),
    /// The media store or database failed mid-ingest; the transaction rolled
    /// back and no partial record set was committed.
    #[error("Storage failure during ingest: {0}")]
    StorageFailure(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageFailure(err.to_string())
    }
}

impl From<sea_orm::DbErr> for IngestError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::StorageFailure(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

impl From<zip::result::ZipError> for IngestError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::InvalidFormat(err.to_string())
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidFormat(_) | Self::UnsafeArchive(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::StorageFailure(_) => InternalServerError(self).into_response(),
        }
    }
}
