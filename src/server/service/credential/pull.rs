//! Full reconciliation of one key against the EVE API.

use std::collections::HashSet;

use chrono::Utc;
use entity::eve_credential::CredentialViolation;
use sea_orm::TransactionTrait;

use crate::server::{
    data::{
        character_credential::CharacterCredentialRepository, credential::CredentialRepository,
        eve::character::CharacterRepository,
    },
    error::{key_api::KeyApiError, Error},
    model::{db::CredentialModel, policy::CredentialKind},
    service::credential::{detach::detach_character, CredentialService},
};

impl<'a> CredentialService<'a> {
    /// Pulls everything the EVE API reports for a key and reconciles the stored state with it.
    ///
    /// Runs one full cycle: fetch key info, merge every character it covers, detach characters
    /// the key no longer covers, evaluate the violation, save, then revoke grants of characters
    /// left without any verified key. Running it twice against unchanged API data only moves
    /// the `modified` timestamp.
    ///
    /// Corporation keys are returned unchanged.
    ///
    /// # Returns
    /// - `Ok(Some(CredentialModel))` - The saved credential, or the stored one unchanged when the
    ///   API reported no characters
    /// - `Ok(None)` - The API answered 403 and the credential deleted itself
    /// - `Err(Error::KeyApiError)` - Transient EVE API failure; nothing about the key was saved
    /// - `Err(Error::DbErr)` - Database failure
    pub async fn pull(&self, credential: CredentialModel) -> Result<Option<CredentialModel>, Error> {
        if credential.kind.as_deref() == Some(CredentialKind::Corporation.as_str()) {
            tracing::debug!(key = %credential.key, "Corporation key, nothing to pull");

            return Ok(Some(credential));
        }

        let info = match self
            .key_api
            .fetch_key_info(credential.key, &credential.code)
            .await
        {
            Ok(info) => info,
            Err(KeyApiError::Unauthorized) => {
                tracing::debug!(key = %credential.key, "Key disabled; deleting");

                self.delete_credential(&credential).await?;

                return Ok(None);
            }
            Err(e) => {
                tracing::error!(key = %credential.key, "Unable to fetch key info: {}", e);

                return Err(e.into());
            }
        };

        if info.characters.is_empty() {
            tracing::error!(key = %credential.key, "No characters returned for key");

            return Ok(Some(credential));
        }

        let mut pulled = credential.clone();
        pulled.mask = info.mask;
        pulled.kind = Some(info.kind.clone());
        pulled.expires = info.expires;
        pulled.verified = self.policy.is_verified(pulled.kind.as_deref(), pulled.mask);

        let mut all_characters_ok = true;
        let mut pulled_characters = HashSet::new();

        for row in &info.characters {
            if row.corporation_name.is_none() {
                tracing::error!(
                    key = %pulled.key,
                    character_id = %row.character_id,
                    "corporationName missing for character, skipping"
                );

                continue;
            }

            match self.pull_character(&mut pulled, row).await? {
                Some(character) => {
                    pulled_characters.insert(character.id);
                }
                None => all_characters_ok = false,
            }
        }

        if all_characters_ok && pulled.violation == Some(CredentialViolation::Character) {
            tracing::info!(key = %pulled.key, "All characters resolved cleanly, clearing character violation");

            pulled.violation = None;
        }

        let now = Utc::now().naive_utc();
        let attached = CharacterRepository::new(self.db)
            .get_by_credential(pulled.id)
            .await?;

        for character in attached
            .iter()
            .filter(|character| !pulled_characters.contains(&character.id))
        {
            tracing::debug!(
                key = %pulled.key,
                character_id = %character.character_id,
                "Key no longer grants access to character"
            );

            let txn = self.db.begin().await?;
            detach_character(&txn, character, &pulled, now).await?;
            txn.commit().await?;
        }

        pulled.violation = self
            .policy
            .evaluate_violation(pulled.violation, pulled.kind.as_deref(), pulled.mask)
            .apply(pulled.violation);

        if pulled.violation.is_some() && pulled.violation != credential.violation {
            tracing::warn!(key = %pulled.key, violation = ?pulled.violation, "Key violates policy");
        }

        pulled.modified = Utc::now().naive_utc();
        let saved = CredentialRepository::new(self.db)
            .save_pulled(&pulled)
            .await?;

        self.revoke_unverified_grants(&saved).await?;

        tracing::debug!(
            key = %saved.key,
            verified = saved.verified,
            violation = ?saved.violation,
            characters = pulled_characters.len(),
            "Pulled key"
        );

        Ok(Some(saved))
    }

    /// Notifies the grant sink once for every character of `credential` left without a
    /// verified key.
    async fn revoke_unverified_grants(&self, credential: &CredentialModel) -> Result<(), Error> {
        let now = Utc::now().naive_utc();
        let links = CharacterCredentialRepository::new(self.db);
        let characters = CharacterRepository::new(self.db)
            .get_by_credential(credential.id)
            .await?;

        for character in characters {
            if links.has_verified_credential(character.id, now).await? {
                continue;
            }

            if let Err(e) = self
                .grant_sink
                .revoke_grants_for_character(character.character_id)
                .await
            {
                tracing::warn!(
                    character_id = %character.character_id,
                    "Failed to revoke grants for character without a verified key: {}",
                    e
                );
            }
        }

        Ok(())
    }
}
