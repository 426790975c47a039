//! Detaching characters from credentials and deleting credentials with their links.

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        character_credential::CharacterCredentialRepository, credential::CredentialRepository,
        eve::character::CharacterRepository,
    },
    error::Error,
    model::db::{CredentialModel, EveCharacterModel},
};

/// Removes the link between a character and a credential.
///
/// The character's owner is cleared as well unless the owner still has another live
/// credential linked to it.
pub async fn detach_character<C: ConnectionTrait>(
    db: &C,
    character: &EveCharacterModel,
    credential: &CredentialModel,
    now: NaiveDateTime,
) -> Result<(), Error> {
    let links = CharacterCredentialRepository::new(db);
    let characters = CharacterRepository::new(db);

    links.unlink(character.id, credential.id).await?;

    let Some(current) = characters.get_by_id(character.id).await? else {
        return Ok(());
    };
    let Some(owner_id) = current.owner_id else {
        return Ok(());
    };

    let remaining = links
        .count_owner_links(character.id, owner_id, credential.id, now)
        .await?;

    if remaining == 0 {
        tracing::debug!(
            character_id = %character.character_id,
            key = %credential.key,
            "Detaching character no longer covered by any key of its owner"
        );

        characters.clear_owner(character.id).await?;
    }

    Ok(())
}

/// Deletes a credential after detaching every character it covers, in one transaction.
pub async fn delete_credential_cascade(
    db: &DatabaseConnection,
    credential: &CredentialModel,
    now: NaiveDateTime,
) -> Result<(), Error> {
    let txn = db.begin().await?;

    let characters = CharacterRepository::new(&txn)
        .get_by_credential(credential.id)
        .await?;

    for character in &characters {
        detach_character(&txn, character, credential, now).await?;
    }

    CredentialRepository::new(&txn).delete(credential.id).await?;

    txn.commit().await?;

    tracing::debug!(key = %credential.key, detached = characters.len(), "Deleted key");

    Ok(())
}
