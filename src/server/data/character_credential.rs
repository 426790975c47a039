//! Links between characters and the credentials granting access to them.

use chrono::{NaiveDateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};

/// Repository for the character to credential link table.
pub struct CharacterCredentialRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// Credentials that have not expired as of `now`.
fn live_credential(now: NaiveDateTime) -> Condition {
    Condition::any()
        .add(entity::eve_credential::Column::Expires.is_null())
        .add(entity::eve_credential::Column::Expires.gt(now))
}

impl<'a, C: ConnectionTrait> CharacterCredentialRepository<'a, C> {
    /// Creates a new instance of [`CharacterCredentialRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that a credential grants access to a character; a no-op if already linked.
    pub async fn link(&self, character_id: i32, credential_id: i32) -> Result<(), DbErr> {
        let link = entity::eve_character_credential::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            credential_id: ActiveValue::Set(credential_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        entity::prelude::EveCharacterCredential::insert(link)
            .on_conflict(
                OnConflict::columns([
                    entity::eve_character_credential::Column::CharacterId,
                    entity::eve_character_credential::Column::CredentialId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Removes the link between a character and a credential, if any.
    pub async fn unlink(&self, character_id: i32, credential_id: i32) -> Result<(), DbErr> {
        entity::prelude::EveCharacterCredential::delete_many()
            .filter(entity::eve_character_credential::Column::CharacterId.eq(character_id))
            .filter(entity::eve_character_credential::Column::CredentialId.eq(credential_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Counts live credentials of `owner_id`, other than `excluding`, still linked to a character.
    pub async fn count_owner_links(
        &self,
        character_id: i32,
        owner_id: i32,
        excluding: i32,
        now: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        entity::prelude::EveCharacterCredential::find()
            .join(
                JoinType::InnerJoin,
                entity::eve_character_credential::Relation::EveCredential.def(),
            )
            .filter(entity::eve_character_credential::Column::CharacterId.eq(character_id))
            .filter(entity::eve_credential::Column::OwnerId.eq(owner_id))
            .filter(entity::eve_credential::Column::Id.ne(excluding))
            .filter(live_credential(now))
            .count(self.db)
            .await
    }

    /// Whether any live credential linked to the character is verified.
    pub async fn has_verified_credential(
        &self,
        character_id: i32,
        now: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let verified = entity::prelude::EveCharacterCredential::find()
            .join(
                JoinType::InnerJoin,
                entity::eve_character_credential::Relation::EveCredential.def(),
            )
            .filter(entity::eve_character_credential::Column::CharacterId.eq(character_id))
            .filter(entity::eve_credential::Column::Verified.eq(true))
            .filter(live_credential(now))
            .count(self.db)
            .await?;

        Ok(verified > 0)
    }
}
