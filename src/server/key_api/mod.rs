//! Client interface for the EVE API key endpoints.
//!
//! The reconciliation service only ever talks to the EVE API through the [`KeyApi`] trait so
//! tests can point it at a mock server and alternative transports can be swapped in. The
//! production implementation is [`http::HttpKeyApi`].

pub mod http;
pub mod model;

use async_trait::async_trait;

use crate::server::{
    error::key_api::KeyApiError,
    key_api::model::{CharacterView, KeyInfo},
};

/// Read access to the EVE API endpoints a credential pull needs.
///
/// Implementations return [`KeyApiError::Unauthorized`] for a 403 and treat every other
/// failure, timeouts included, as transient.
#[async_trait]
pub trait KeyApi: Send + Sync {
    /// Fetches the key's type, access mask, expiry and the characters it covers.
    async fn fetch_key_info(&self, key: i64, code: &str) -> Result<KeyInfo, KeyApiError>;

    /// Fetches the full character sheet; requires the `CharacterSheet` capability.
    async fn fetch_character_sheet(
        &self,
        key: i64,
        code: &str,
        character_id: i64,
    ) -> Result<CharacterView, KeyApiError>;

    /// Fetches public character info; requires the `CharacterInfoPublic` capability.
    async fn fetch_character_info(
        &self,
        key: i64,
        code: &str,
        character_id: i64,
    ) -> Result<CharacterView, KeyApiError>;
}
