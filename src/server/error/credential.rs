//! Credential and account management errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Failures of credential and account management requests.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No credential is stored under this key ID.
    #[error("Credential with key {0} not found")]
    NotFound(i64),
    /// Another credential already uses this key ID.
    #[error("Key {0} is already registered")]
    KeyAlreadyRegistered(i64),
    /// The EVE API answered 403 while registering the key.
    #[error("Key {0} was rejected by the EVE API and has been removed")]
    KeyRejected(i64),
    /// The owning account does not exist.
    #[error("Account {0} not found")]
    AccountNotFound(i32),
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let status = match self {
            Self::NotFound(_) | Self::AccountNotFound(_) => StatusCode::NOT_FOUND,
            Self::KeyAlreadyRegistered(_) => StatusCode::CONFLICT,
            Self::KeyRejected(_) => StatusCode::BAD_REQUEST,
        };

        error_response(status, self.to_string())
    }
}
