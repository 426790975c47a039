//! Identity registry: characters, corporations and alliances keyed by EVE Online ID.

use sea_orm::ConnectionTrait;

use crate::server::{
    data::eve::{
        alliance::AllianceRepository, character::CharacterRepository,
        corporation::CorporationRepository,
    },
    error::Error,
    key_api::model::CharacterView,
    model::db::{EveAllianceModel, EveCharacterModel, EveCorporationModel},
};

/// Registry of characters, corporations and alliances by EVE Online ID.
pub struct IdentityRegistry<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> IdentityRegistry<'a, C> {
    /// Creates a new instance of [`IdentityRegistry`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Looks up a character by EVE Online ID without creating it.
    pub async fn resolve_identity(
        &self,
        character_id: i64,
    ) -> Result<Option<EveCharacterModel>, Error> {
        Ok(CharacterRepository::new(self.db)
            .get_by_character_id(character_id)
            .await?)
    }

    /// Gets or creates a character by EVE Online ID.
    ///
    /// Returns whether this call created the row, which decides whether a failed merge must
    /// delete it again.
    pub async fn upsert_identity(
        &self,
        character_id: i64,
        name: &str,
    ) -> Result<(EveCharacterModel, bool), Error> {
        Ok(CharacterRepository::new(self.db)
            .get_or_create(character_id, name)
            .await?)
    }

    /// Resolves the corporation and alliance a character view reports.
    ///
    /// The alliance is resolved first, and only when the view carries an alliance ID. Names
    /// that drifted since the row was stored are corrected, and the corporation is moved to
    /// the reported alliance. Rows are only written when something actually changed.
    pub async fn reconcile_corporation_membership(
        &self,
        view: &CharacterView,
    ) -> Result<(EveCorporationModel, Option<EveAllianceModel>), Error> {
        let alliance_repo = AllianceRepository::new(self.db);
        let corporation_repo = CorporationRepository::new(self.db);

        let alliance = match view.alliance_id {
            Some(alliance_id) => {
                let name = view.alliance_name.as_deref().unwrap_or_default();
                let (alliance, created) = alliance_repo.get_or_create(alliance_id, name).await?;

                if !created && !name.is_empty() && alliance.name != name {
                    tracing::debug!(
                        alliance_id = %alliance_id,
                        old = %alliance.name,
                        new = %name,
                        "Correcting alliance name"
                    );

                    Some(alliance_repo.update_name(alliance, name).await?)
                } else {
                    Some(alliance)
                }
            }
            None => None,
        };

        let alliance_pk = alliance.as_ref().map(|alliance| alliance.id);
        let name = view.corporation_name.as_deref().unwrap_or_default();
        let (corporation, created) = corporation_repo
            .get_or_create(view.corporation_id, name, alliance_pk)
            .await?;

        if created {
            return Ok((corporation, alliance));
        }

        let name_drifted = !name.is_empty() && corporation.name != name;
        if !name_drifted && corporation.alliance_id == alliance_pk {
            return Ok((corporation, alliance));
        }

        let name = if name_drifted {
            tracing::debug!(
                corporation_id = %view.corporation_id,
                old = %corporation.name,
                new = %name,
                "Correcting corporation name"
            );

            name.to_string()
        } else {
            corporation.name.clone()
        };

        let corporation = corporation_repo
            .update(corporation, &name, alliance_pk)
            .await?;

        Ok((corporation, alliance))
    }
}
