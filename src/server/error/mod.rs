//! Error types for the keyward server application.
//!
//! Each domain carries its own `thiserror` enum (configuration, the EVE API key client,
//! credential management) which is aggregated into [`Error`]. Every error implements axum's
//! `IntoResponse` so controllers can return `Result<_, Error>` directly.
//!
//! Policy violations on a credential are never errors; they are recorded on the credential
//! itself by the reconciliation service.

pub mod config;
pub mod credential;
pub mod key_api;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{config::ConfigError, credential::CredentialError, key_api::KeyApiError},
};

/// Main error type for the keyward server application.
///
/// Aggregates the domain error enums and the external library errors so `?` works across
/// repositories, services, the scheduler and controllers alike.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// EVE API key client error (revoked key, bad status, transport or decode failure).
    #[error(transparent)]
    KeyApiError(#[from] KeyApiError),
    /// Credential management error (unknown key, duplicate key, rejected key, unknown account).
    #[error(transparent)]
    CredentialError(#[from] CredentialError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error, such as failing to bind the HTTP listener.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - The EVE API rejected the key being registered
/// - 404 Not Found - Unknown credential or account
/// - 409 Conflict - Key already registered
/// - 502 Bad Gateway - The EVE API could not be reached or returned garbage
/// - 500 Internal Server Error - Everything else (logged, body never carries details)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::KeyApiError(err) => err.into_response(),
            Self::CredentialError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details never reach the
/// client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Builds a JSON [`ErrorDto`] response with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}
