//! `reqwest` implementation of [`KeyApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::server::{
    error::key_api::KeyApiError,
    key_api::{
        model::{CharacterView, KeyInfo, RawCharacterView, RawKeyInfo},
        KeyApi,
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON client for the EVE API key endpoints.
pub struct HttpKeyApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpKeyApi {
    /// Creates a client against `base_url`, identifying itself with `user_agent`.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Result<Self, KeyApiError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, KeyApiError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(KeyApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(KeyApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| KeyApiError::Decode(e.to_string()))
    }

    async fn get_character_view(
        &self,
        path: &str,
        key: i64,
        code: &str,
        character_id: i64,
    ) -> Result<CharacterView, KeyApiError> {
        let raw: RawCharacterView = self
            .get(
                path,
                &[
                    ("keyID", key.to_string()),
                    ("vCode", code.to_string()),
                    ("characterID", character_id.to_string()),
                ],
            )
            .await?;

        CharacterView::try_from(raw)
    }
}

#[async_trait]
impl KeyApi for HttpKeyApi {
    async fn fetch_key_info(&self, key: i64, code: &str) -> Result<KeyInfo, KeyApiError> {
        let raw: RawKeyInfo = self
            .get(
                "/account/APIKeyInfo",
                &[("keyID", key.to_string()), ("vCode", code.to_string())],
            )
            .await?;

        Ok(KeyInfo::from(raw))
    }

    async fn fetch_character_sheet(
        &self,
        key: i64,
        code: &str,
        character_id: i64,
    ) -> Result<CharacterView, KeyApiError> {
        self.get_character_view("/char/CharacterSheet", key, code, character_id)
            .await
    }

    async fn fetch_character_info(
        &self,
        key: i64,
        code: &str,
        character_id: i64,
    ) -> Result<CharacterView, KeyApiError> {
        self.get_character_view("/eve/CharacterInfo", key, code, character_id)
            .await
    }
}
