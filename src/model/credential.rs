use chrono::NaiveDateTime;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CredentialDto {
    pub key: i64,
    pub kind: Option<String>,
    pub mask: i64,
    pub verified: bool,
    /// One of `Character`, `Kind` or `Mask` when the key has a compliance problem
    pub violation: Option<String>,
    pub expires: Option<NaiveDateTime>,
    pub modified: NaiveDateTime,
    pub characters: Vec<CredentialCharacterDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CredentialCharacterDto {
    pub id: i64,
    pub name: String,
}

/// Request body for registering an API key
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddCredentialDto {
    pub key: i64,
    pub code: String,
}

/// Result of an on-demand pull
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PullResultDto {
    /// `true` when the API rejected the key and the credential was removed
    pub deleted: bool,
    pub credential: Option<CredentialDto>,
}

impl CredentialDto {
    /// Builds the DTO for a credential and the characters it covers.
    pub fn new(
        credential: entity::eve_credential::Model,
        characters: Vec<entity::eve_character::Model>,
    ) -> Self {
        Self {
            key: credential.key,
            kind: credential.kind,
            mask: credential.mask,
            verified: credential.verified,
            violation: credential.violation.map(|violation| violation.to_value()),
            expires: credential.expires,
            modified: credential.modified,
            characters: characters
                .into_iter()
                .map(|character| CredentialCharacterDto {
                    id: character.character_id,
                    name: character.name,
                })
                .collect(),
        }
    }
}
