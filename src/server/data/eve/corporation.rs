//! EVE corporation rows.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

/// Repository for EVE corporations.
pub struct CorporationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CorporationRepository<'a, C> {
    /// Creates a new instance of [`CorporationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets a corporation by EVE Online corporation ID, creating it if absent.
    ///
    /// `alliance_id` is the alliance's database ID. Neither it nor `name` is applied to an
    /// existing row; use [`Self::update`] for that.
    pub async fn get_or_create(
        &self,
        corporation_id: i64,
        name: &str,
        alliance_id: Option<i32>,
    ) -> Result<(entity::eve_corporation::Model, bool), DbErr> {
        let now = Utc::now().naive_utc();
        let corporation = entity::eve_corporation::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            name: ActiveValue::Set(name.to_string()),
            alliance_id: ActiveValue::Set(alliance_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let inserted = entity::prelude::EveCorporation::insert(corporation)
            .on_conflict(
                OnConflict::column(entity::eve_corporation::Column::CorporationId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        let corporation = self
            .get_by_corporation_id(corporation_id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("eve_corporation {}", corporation_id))
            })?;

        Ok((corporation, inserted > 0))
    }

    /// Gets a corporation by EVE Online corporation ID.
    pub async fn get_by_corporation_id(
        &self,
        corporation_id: i64,
    ) -> Result<Option<entity::eve_corporation::Model>, DbErr> {
        entity::prelude::EveCorporation::find()
            .filter(entity::eve_corporation::Column::CorporationId.eq(corporation_id))
            .one(self.db)
            .await
    }

    /// Sets the name and alliance of a corporation.
    pub async fn update(
        &self,
        corporation: entity::eve_corporation::Model,
        name: &str,
        alliance_id: Option<i32>,
    ) -> Result<entity::eve_corporation::Model, DbErr> {
        let mut corporation: entity::eve_corporation::ActiveModel = corporation.into();
        corporation.name = ActiveValue::Set(name.to_string());
        corporation.alliance_id = ActiveValue::Set(alliance_id);
        corporation.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        corporation.update(self.db).await
    }
}
