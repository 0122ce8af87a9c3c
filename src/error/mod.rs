//! Error types for the tradelist server.
//!
//! A root [`Error`] enum aggregates the domain-specific error types and the
//! external library errors, all convertible via `?`. Every error implements
//! `IntoResponse`; anything without a specific mapping falls back to the
//! [`InternalServerError`] wrapper, which logs the cause server-side and
//! returns a generic message to the client.

pub mod config;
pub mod ingest;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, ingest::IngestError},
    model::api::ErrorDto,
};

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Upload ingest error (bad payload, unsafe archive, storage failure).
    #[error(transparent)]
    IngestError(#[from] IngestError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Filesystem error (media root creation, image storage).
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::IngestError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error for debugging while returning a generic message so
/// internal details never reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
