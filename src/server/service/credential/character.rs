//! Merging a single character row of a key into the identity registry.

use sea_orm::TransactionTrait;

use entity::eve_credential::CredentialViolation;

use crate::server::{
    data::{
        account::AccountRepository, character_credential::CharacterCredentialRepository,
        eve::character::CharacterRepository,
    },
    error::Error,
    key_api::model::{CharacterView, KeyCharacter},
    model::{
        db::{CredentialModel, EveCharacterModel},
        mask::{Capability, KeyMask},
    },
    service::{credential::CredentialService, eve::identity::IdentityRegistry},
    util::text::strip_tags,
};

enum MergeOutcome {
    Merged(EveCharacterModel),
    /// Another account won the ownership claim.
    Claimed(Option<i32>),
}

impl<'a> CredentialService<'a> {
    /// Merges one character row of a key into the registry.
    ///
    /// Every descriptive attribute is overwritten with what this key can see, so a key with a
    /// smaller mask pulled after a richer one replaces the richer data.
    ///
    /// # Returns
    /// - `Ok(Some(EveCharacterModel))` - The character is owned by the credential's owner and
    ///   linked to the credential
    /// - `Ok(None)` - The character belongs to another account; `credential.violation` is now
    ///   `Character` and both accounts are flagged as duplicates
    /// - `Err(Error)` - Fetching or storing the character failed; a character row created by
    ///   this call has been deleted again unless a concurrent pull claimed or linked it
    pub(super) async fn pull_character(
        &self,
        credential: &mut CredentialModel,
        row: &KeyCharacter,
    ) -> Result<Option<EveCharacterModel>, Error> {
        let registry = IdentityRegistry::new(self.db);
        let (character, created) = registry
            .upsert_identity(row.character_id, &row.name)
            .await?;

        if !created {
            if let Some(owner_id) = character.owner_id.filter(|id| *id != credential.owner_id) {
                self.flag_character_conflict(credential, &character, Some(owner_id))
                    .await?;

                return Ok(None);
            }
        }

        match self.merge_character(credential, row, &character).await {
            Ok(MergeOutcome::Merged(character)) => Ok(Some(character)),
            Ok(MergeOutcome::Claimed(owner_id)) => {
                self.flag_character_conflict(credential, &character, owner_id)
                    .await?;

                Ok(None)
            }
            Err(e) => {
                tracing::warn!(
                    key = %credential.key,
                    character_id = %row.character_id,
                    "An error occurred while querying data for character: {}",
                    e
                );

                if created
                    && !CharacterRepository::new(self.db)
                        .delete_orphan(character.id)
                        .await?
                {
                    tracing::debug!(
                        character_id = %row.character_id,
                        "Character claimed by a concurrent pull, keeping it"
                    );
                }

                Err(e)
            }
        }
    }

    async fn merge_character(
        &self,
        credential: &CredentialModel,
        row: &KeyCharacter,
        character: &EveCharacterModel,
    ) -> Result<MergeOutcome, Error> {
        let mut view = self.fetch_character_view(credential, row).await?;
        if view.corporation_name.is_none() {
            view.corporation_name = row.corporation_name.clone();
        }
        view.titles = view.titles.iter().map(|title| strip_tags(title)).collect();

        let (corporation, alliance) = IdentityRegistry::new(self.db)
            .reconcile_corporation_membership(&view)
            .await?;

        let txn = self.db.begin().await?;
        let characters = CharacterRepository::new(&txn);

        if !characters
            .claim_owner(character.id, credential.owner_id)
            .await?
        {
            let owner_id = characters
                .get_by_id(character.id)
                .await?
                .and_then(|character| character.owner_id);
            txn.rollback().await?;

            return Ok(MergeOutcome::Claimed(owner_id));
        }

        let merged = characters
            .update_from_view(
                character.clone(),
                &view,
                corporation.id,
                alliance.map(|alliance| alliance.id),
            )
            .await?;

        CharacterCredentialRepository::new(&txn)
            .link(merged.id, credential.id)
            .await?;

        txn.commit().await?;

        Ok(MergeOutcome::Merged(merged))
    }

    /// Fetches the richest view of a character the key's mask allows.
    ///
    /// Falls back to the key info row itself when the mask grants neither the character sheet
    /// nor public character info.
    async fn fetch_character_view(
        &self,
        credential: &CredentialModel,
        row: &KeyCharacter,
    ) -> Result<CharacterView, Error> {
        let mask = KeyMask::for_kind(credential.kind.as_deref(), credential.mask);
        let grants = |capability| {
            mask.and_then(|mask| mask.grants(capability))
                .unwrap_or(false)
        };

        let view = if grants(Capability::CharacterSheet) {
            self.key_api
                .fetch_character_sheet(credential.key, &credential.code, row.character_id)
                .await?
        } else if grants(Capability::CharacterInfoPublic) {
            self.key_api
                .fetch_character_info(credential.key, &credential.code, row.character_id)
                .await?
        } else {
            CharacterView::from(row)
        };

        Ok(view)
    }

    async fn flag_character_conflict(
        &self,
        credential: &mut CredentialModel,
        character: &EveCharacterModel,
        owner_id: Option<i32>,
    ) -> Result<(), Error> {
        tracing::warn!(
            key = %credential.key,
            character_id = %character.character_id,
            character_name = %character.name,
            owner_id = ?owner_id,
            claimant_id = %credential.owner_id,
            "Security violation detected: multiple accounts trying to register character"
        );

        credential.violation = Some(CredentialViolation::Character);

        if let Some(owner_id) = owner_id {
            AccountRepository::new(self.db)
                .add_duplicate(credential.owner_id, owner_id)
                .await?;
        }

        Ok(())
    }
}
