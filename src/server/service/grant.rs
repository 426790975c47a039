//! Revocation of downstream application grants.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{eve::character::CharacterRepository, grant::GrantRepository},
    error::Error,
};

/// Receives notice that a character no longer has any verified credential.
///
/// Receivers must be idempotent; the pull calls this at most once per character per cycle and
/// logs rather than propagates failures.
#[async_trait]
pub trait GrantRevocationSink: Send + Sync {
    /// Revokes every grant a character holds downstream.
    async fn revoke_grants_for_character(&self, character_id: i64) -> Result<(), Error>;
}

/// Sink deleting the character's `application_grant` rows.
pub struct DbGrantRevocationSink {
    db: DatabaseConnection,
}

impl DbGrantRevocationSink {
    /// Creates a sink deleting grants through `db`.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GrantRevocationSink for DbGrantRevocationSink {
    async fn revoke_grants_for_character(&self, character_id: i64) -> Result<(), Error> {
        let Some(character) = CharacterRepository::new(&self.db)
            .get_by_character_id(character_id)
            .await?
        else {
            return Ok(());
        };

        let removed = GrantRepository::new(&self.db)
            .delete_by_character(character.id)
            .await?;

        if removed > 0 {
            tracing::info!(
                character_id = %character_id,
                removed = removed,
                "Revoked application grants for character without a verified key"
            );
        }

        Ok(())
    }
}
