//! Downstream application grants held by characters.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

/// Repository for downstream application grants.
pub struct GrantRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GrantRepository<'a, C> {
    /// Creates a new instance of [`GrantRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Every grant held by a character.
    pub async fn get_by_character(
        &self,
        character_id: i32,
    ) -> Result<Vec<entity::application_grant::Model>, DbErr> {
        entity::prelude::ApplicationGrant::find()
            .filter(entity::application_grant::Column::CharacterId.eq(character_id))
            .all(self.db)
            .await
    }

    /// Deletes every grant held by a character, returning how many were removed.
    pub async fn delete_by_character(&self, character_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::ApplicationGrant::delete_many()
            .filter(entity::application_grant::Column::CharacterId.eq(character_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
