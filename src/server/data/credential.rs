//! Stored EVE API keys.

use chrono::{NaiveDateTime, Utc};
use entity::eve_credential::CredentialViolation;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Repository for stored EVE API keys.
pub struct CredentialRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CredentialRepository<'a, C> {
    /// Creates a new instance of [`CredentialRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a credential that has never been pulled.
    ///
    /// Fails with a unique constraint violation if `key` is already registered.
    pub async fn create(
        &self,
        owner_id: i32,
        key: i64,
        code: &str,
    ) -> Result<entity::eve_credential::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let credential = entity::eve_credential::ActiveModel {
            key: ActiveValue::Set(key),
            code: ActiveValue::Set(code.to_string()),
            kind: ActiveValue::Set(None),
            mask: ActiveValue::Set(0),
            verified: ActiveValue::Set(false),
            violation: ActiveValue::Set(None),
            expires: ActiveValue::Set(None),
            owner_id: ActiveValue::Set(owner_id),
            created_at: ActiveValue::Set(now),
            modified: ActiveValue::Set(now),
            ..Default::default()
        };

        credential.insert(self.db).await
    }

    /// Gets a credential by its EVE API key ID.
    pub async fn get_by_key(
        &self,
        key: i64,
    ) -> Result<Option<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find()
            .filter(entity::eve_credential::Column::Key.eq(key))
            .one(self.db)
            .await
    }

    /// Gets a credential by primary key.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Every credential that has not expired as of `now`, ordered by key.
    pub async fn find_live(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find()
            .filter(
                Condition::any()
                    .add(entity::eve_credential::Column::Expires.is_null())
                    .add(entity::eve_credential::Column::Expires.gt(now)),
            )
            .order_by_asc(entity::eve_credential::Column::Key)
            .all(self.db)
            .await
    }

    /// Live credentials owned by an account, ordered by key.
    pub async fn find_live_by_owner(
        &self,
        owner_id: i32,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find()
            .filter(entity::eve_credential::Column::OwnerId.eq(owner_id))
            .filter(
                Condition::any()
                    .add(entity::eve_credential::Column::Expires.is_null())
                    .add(entity::eve_credential::Column::Expires.gt(now)),
            )
            .order_by_asc(entity::eve_credential::Column::Key)
            .all(self.db)
            .await
    }

    /// Every credential owned by an account, expired or not.
    pub async fn find_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find()
            .filter(entity::eve_credential::Column::OwnerId.eq(owner_id))
            .all(self.db)
            .await
    }

    /// Credentials whose expiry is at or before `now`.
    pub async fn find_expired(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<entity::eve_credential::Model>, DbErr> {
        entity::prelude::EveCredential::find()
            .filter(entity::eve_credential::Column::Expires.lte(now))
            .all(self.db)
            .await
    }

    /// Persists the fields a pull is allowed to change.
    pub async fn save_pulled(
        &self,
        credential: &entity::eve_credential::Model,
    ) -> Result<entity::eve_credential::Model, DbErr> {
        let active = entity::eve_credential::ActiveModel {
            id: ActiveValue::Unchanged(credential.id),
            kind: ActiveValue::Set(credential.kind.clone()),
            mask: ActiveValue::Set(credential.mask),
            verified: ActiveValue::Set(credential.verified),
            violation: ActiveValue::Set(credential.violation),
            expires: ActiveValue::Set(credential.expires),
            modified: ActiveValue::Set(credential.modified),
            ..Default::default()
        };

        active.update(self.db).await
    }

    /// Overwrites only the violation of a credential.
    pub async fn update_violation(
        &self,
        id: i32,
        violation: Option<CredentialViolation>,
    ) -> Result<entity::eve_credential::Model, DbErr> {
        let active = entity::eve_credential::ActiveModel {
            id: ActiveValue::Unchanged(id),
            violation: ActiveValue::Set(violation),
            ..Default::default()
        };

        active.update(self.db).await
    }

    /// Deletes a credential; its character links cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::EveCredential::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
