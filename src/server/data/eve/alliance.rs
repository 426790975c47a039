//! EVE alliance rows.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

/// Repository for EVE alliances.
pub struct AllianceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceRepository<'a, C> {
    /// Creates a new instance of [`AllianceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets an alliance by EVE Online alliance ID, creating it with `name` if absent.
    ///
    /// # Returns
    /// - `Ok((Model, true))` - The alliance was created by this call
    /// - `Ok((Model, false))` - The alliance already existed; `name` was not applied
    pub async fn get_or_create(
        &self,
        alliance_id: i64,
        name: &str,
    ) -> Result<(entity::eve_alliance::Model, bool), DbErr> {
        let now = Utc::now().naive_utc();
        let alliance = entity::eve_alliance::ActiveModel {
            alliance_id: ActiveValue::Set(alliance_id),
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = entity::prelude::EveAlliance::insert(alliance)
            .on_conflict(
                OnConflict::column(entity::eve_alliance::Column::AllianceId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let alliance = self
            .get_by_alliance_id(alliance_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("eve_alliance {}", alliance_id)))?;

        Ok((alliance, inserted > 0))
    }

    /// Get an alliance using its EVE Online alliance ID
    pub async fn get_by_alliance_id(
        &self,
        alliance_id: i64,
    ) -> Result<Option<entity::eve_alliance::Model>, DbErr> {
        entity::prelude::EveAlliance::find()
            .filter(entity::eve_alliance::Column::AllianceId.eq(alliance_id))
            .one(self.db)
            .await
    }

    /// Renames a stored alliance.
    pub async fn update_name(
        &self,
        alliance: entity::eve_alliance::Model,
        name: &str,
    ) -> Result<entity::eve_alliance::Model, DbErr> {
        let mut alliance: entity::eve_alliance::ActiveModel = alliance.into();
        alliance.name = ActiveValue::Set(name.to_string());
        alliance.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        alliance.update(self.db).await
    }
}
