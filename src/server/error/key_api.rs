//! EVE API key client errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Failures returned by a [`KeyApi`](crate::server::key_api::KeyApi) implementation.
///
/// Only [`KeyApiError::Unauthorized`] is terminal for a key; every other variant is transient
/// and leaves the stored credential untouched.
#[derive(Error, Debug)]
pub enum KeyApiError {
    /// The API answered 403: the key was deleted, expired or had its code changed.
    #[error("EVE API rejected the key (403 Forbidden)")]
    Unauthorized,
    /// Any other non-success status code.
    #[error("EVE API returned unexpected status {0}")]
    Status(u16),
    /// Transport failure, including timeouts.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    /// The body could not be interpreted as the expected payload.
    #[error("Failed to decode EVE API response: {0}")]
    Decode(String),
}

impl KeyApiError {
    /// Whether the failure means the key itself is invalid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl IntoResponse for KeyApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => {
                tracing::debug!("{}", self);

                error_response(StatusCode::BAD_REQUEST, "The EVE API rejected this key")
            }
            err => {
                tracing::error!("{}", err);

                error_response(StatusCode::BAD_GATEWAY, "The EVE API is currently unavailable")
            }
        }
    }
}
