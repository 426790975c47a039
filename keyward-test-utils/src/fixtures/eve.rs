//! EVE entity database insertion utilities.
//!
//! Parent entities are created automatically when missing, and an existing record with the
//! same EVE ID is returned instead of inserting a duplicate.

use chrono::Utc;
use entity::{eve_alliance, eve_character, eve_corporation};
use sea_orm::{ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn eve<'a>(&'a mut self) -> EveFixtures<'a> {
        EveFixtures { test: self }
    }
}

pub struct EveFixtures<'a> {
    pub test: &'a mut TestContext,
}

impl<'a> EveFixtures<'a> {
    /// Insert a mock alliance named `Alliance {alliance_id}`.
    pub async fn insert_mock_alliance(
        &self,
        alliance_id: i64,
    ) -> Result<eve_alliance::Model, TestError> {
        if let Some(existing) = entity::prelude::EveAlliance::find()
            .filter(eve_alliance::Column::AllianceId.eq(alliance_id))
            .one(&self.test.db)
            .await?
        {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveAlliance::insert(eve_alliance::ActiveModel {
                alliance_id: ActiveValue::Set(alliance_id),
                name: ActiveValue::Set(format!("Alliance {}", alliance_id)),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Insert a mock corporation named `Corporation {corporation_id}`.
    ///
    /// # Arguments
    /// - `corporation_id` - EVE corporation ID
    /// - `alliance_id` - Optional EVE alliance ID, created when missing
    pub async fn insert_mock_corporation(
        &self,
        corporation_id: i64,
        alliance_id: Option<i64>,
    ) -> Result<eve_corporation::Model, TestError> {
        if let Some(existing) = entity::prelude::EveCorporation::find()
            .filter(eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(&self.test.db)
            .await?
        {
            return Ok(existing);
        }

        let alliance_model_id = match alliance_id {
            Some(alliance_id) => Some(self.insert_mock_alliance(alliance_id).await?.id),
            None => None,
        };
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveCorporation::insert(eve_corporation::ActiveModel {
                corporation_id: ActiveValue::Set(corporation_id),
                name: ActiveValue::Set(format!("Corporation {}", corporation_id)),
                alliance_id: ActiveValue::Set(alliance_model_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Insert a mock character named `Character {character_id}`.
    ///
    /// The corporation is created when missing and the character takes over its alliance.
    ///
    /// # Arguments
    /// - `character_id` - EVE character ID
    /// - `corporation_id` - EVE corporation ID the character belongs to
    /// - `owner_id` - Account currently claiming the character
    pub async fn insert_mock_character(
        &self,
        character_id: i64,
        corporation_id: i64,
        owner_id: Option<i32>,
    ) -> Result<eve_character::Model, TestError> {
        if let Some(existing) = entity::prelude::EveCharacter::find()
            .filter(eve_character::Column::CharacterId.eq(character_id))
            .one(&self.test.db)
            .await?
        {
            return Ok(existing);
        }

        let corporation = self.insert_mock_corporation(corporation_id, None).await?;
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveCharacter::insert(eve_character::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                name: ActiveValue::Set(format!("Character {}", character_id)),
                race: ActiveValue::Set(None),
                bloodline: ActiveValue::Set(None),
                ancestry: ActiveValue::Set(None),
                gender: ActiveValue::Set(None),
                security_status: ActiveValue::Set(None),
                titles: ActiveValue::Set(serde_json::json!([])),
                roles: ActiveValue::Set(serde_json::json!([])),
                corporation_id: ActiveValue::Set(Some(corporation.id)),
                alliance_id: ActiveValue::Set(corporation.alliance_id),
                owner_id: ActiveValue::Set(owner_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
