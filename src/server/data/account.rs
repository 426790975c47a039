//! Operator accounts and the symmetric duplicate registry.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Repository for operator accounts and their duplicate links.
pub struct AccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccountRepository<'a, C> {
    /// Creates a new instance of [`AccountRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an account named `name`.
    pub async fn create(&self, name: &str) -> Result<entity::account::Model, DbErr> {
        let account = entity::account::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        account.insert(self.db).await
    }

    /// Gets an account by primary key.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::account::Model>, DbErr> {
        entity::prelude::Account::find_by_id(id).one(self.db).await
    }

    /// Deletes an account
    ///
    /// Credentials cascade at the database level; callers wanting characters detached must
    /// delete credentials first.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Account::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Flags two accounts as controlled by the same person.
    ///
    /// Symmetric and idempotent: the pair is stored with the lower ID first and re-adding an
    /// existing pair is a no-op. An account is never a duplicate of itself.
    pub async fn add_duplicate(&self, account_id: i32, other_id: i32) -> Result<(), DbErr> {
        if account_id == other_id {
            return Ok(());
        }

        let (low, high) = if account_id < other_id {
            (account_id, other_id)
        } else {
            (other_id, account_id)
        };

        let duplicate = entity::account_duplicate::ActiveModel {
            account_id: ActiveValue::Set(low),
            duplicate_account_id: ActiveValue::Set(high),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        entity::prelude::AccountDuplicate::insert(duplicate)
            .on_conflict(
                OnConflict::columns([
                    entity::account_duplicate::Column::AccountId,
                    entity::account_duplicate::Column::DuplicateAccountId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Accounts flagged as duplicates of `account_id`, ordered by ID.
    pub async fn get_duplicates(&self, account_id: i32) -> Result<Vec<entity::account::Model>, DbErr> {
        let pairs = entity::prelude::AccountDuplicate::find()
            .filter(
                Condition::any()
                    .add(entity::account_duplicate::Column::AccountId.eq(account_id))
                    .add(entity::account_duplicate::Column::DuplicateAccountId.eq(account_id)),
            )
            .all(self.db)
            .await?;

        let other_ids: Vec<i32> = pairs
            .into_iter()
            .map(|pair| {
                if pair.account_id == account_id {
                    pair.duplicate_account_id
                } else {
                    pair.account_id
                }
            })
            .collect();

        entity::prelude::Account::find()
            .filter(entity::account::Column::Id.is_in(other_ids))
            .order_by_asc(entity::account::Column::Id)
            .all(self.db)
            .await
    }
}
