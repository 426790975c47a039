//! EVE character rows, including the compare-and-swap ownership claim.

use chrono::Utc;
use migration::{Expr, OnConflict};
use sea_orm::{
    sea_query::Query, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use serde_json::json;

use crate::server::key_api::model::CharacterView;

/// Repository for EVE characters and their ownership.
pub struct CharacterRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CharacterRepository<'a, C> {
    /// Creates a new instance of [`CharacterRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets a character by EVE Online character ID, creating an unowned row named `name` if absent.
    ///
    /// # Returns
    /// - `Ok((Model, true))` - The character was created by this call
    /// - `Ok((Model, false))` - The character already existed
    pub async fn get_or_create(
        &self,
        character_id: i64,
        name: &str,
    ) -> Result<(entity::eve_character::Model, bool), DbErr> {
        let now = Utc::now().naive_utc();
        let character = entity::eve_character::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            name: ActiveValue::Set(name.to_string()),
            race: ActiveValue::Set(None),
            bloodline: ActiveValue::Set(None),
            ancestry: ActiveValue::Set(None),
            gender: ActiveValue::Set(None),
            security_status: ActiveValue::Set(None),
            titles: ActiveValue::Set(json!([])),
            roles: ActiveValue::Set(json!([])),
            corporation_id: ActiveValue::Set(None),
            alliance_id: ActiveValue::Set(None),
            owner_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = entity::prelude::EveCharacter::insert(character)
            .on_conflict(
                OnConflict::column(entity::eve_character::Column::CharacterId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let character = self
            .get_by_character_id(character_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("eve_character {}", character_id)))?;

        Ok((character, inserted > 0))
    }

    /// Gets a character by EVE Online character ID.
    pub async fn get_by_character_id(
        &self,
        character_id: i64,
    ) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .filter(entity::eve_character::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Gets a character by primary key.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find_by_id(id).one(self.db).await
    }

    /// Characters the credential with database ID `credential_id` currently grants access to.
    pub async fn get_by_credential(
        &self,
        credential_id: i32,
    ) -> Result<Vec<entity::eve_character::Model>, DbErr> {
        entity::prelude::EveCharacter::find()
            .join(
                JoinType::InnerJoin,
                entity::eve_character::Relation::EveCharacterCredential.def(),
            )
            .filter(entity::eve_character_credential::Column::CredentialId.eq(credential_id))
            .all(self.db)
            .await
    }

    /// Claims the character for `owner_id` unless another account already owns it.
    ///
    /// The ownership check and the write happen in a single `UPDATE`, so two concurrent claims
    /// for different owners can never both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - The character is now owned by `owner_id`
    /// - `Ok(false)` - Another account owns the character; nothing was written
    pub async fn claim_owner(&self, id: i32, owner_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EveCharacter::update_many()
            .col_expr(entity::eve_character::Column::OwnerId, Expr::value(owner_id))
            .filter(entity::eve_character::Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(entity::eve_character::Column::OwnerId.is_null())
                    .add(entity::eve_character::Column::OwnerId.eq(owner_id)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Releases a character so any account may claim it again.
    pub async fn clear_owner(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::EveCharacter::update_many()
            .col_expr(
                entity::eve_character::Column::OwnerId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::eve_character::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::eve_character::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Overwrites every descriptive attribute and the affiliation of a character.
    ///
    /// `corporation_id` and `alliance_id` are database IDs. Titles are stored as given.
    pub async fn update_from_view(
        &self,
        character: entity::eve_character::Model,
        view: &CharacterView,
        corporation_id: i32,
        alliance_id: Option<i32>,
    ) -> Result<entity::eve_character::Model, DbErr> {
        let mut character: entity::eve_character::ActiveModel = character.into();
        character.name = ActiveValue::Set(view.name.clone());
        character.race = ActiveValue::Set(view.race.clone());
        character.bloodline = ActiveValue::Set(view.bloodline.clone());
        character.ancestry = ActiveValue::Set(view.ancestry.clone());
        character.gender = ActiveValue::Set(view.gender.clone());
        character.security_status = ActiveValue::Set(view.security_status);
        character.titles = ActiveValue::Set(json!(view.titles));
        character.roles = ActiveValue::Set(json!(view.roles));
        character.corporation_id = ActiveValue::Set(Some(corporation_id));
        character.alliance_id = ActiveValue::Set(alliance_id);
        character.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        character.update(self.db).await
    }

    /// Deletes a character only while no account owns it and no credential links to it.
    ///
    /// # Returns
    /// - `Ok(true)` - The orphaned row was deleted
    /// - `Ok(false)` - The character was claimed or linked meanwhile and was kept
    pub async fn delete_orphan(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EveCharacter::delete_many()
            .filter(entity::eve_character::Column::Id.eq(id))
            .filter(entity::eve_character::Column::OwnerId.is_null())
            .filter(
                entity::eve_character::Column::Id.not_in_subquery(
                    Query::select()
                        .column(entity::eve_character_credential::Column::CharacterId)
                        .from(entity::eve_character_credential::Entity)
                        .to_owned(),
                ),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
