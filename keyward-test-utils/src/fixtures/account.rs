use chrono::Utc;
use entity::account;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn account<'a>(&'a mut self) -> AccountFixtures<'a> {
        AccountFixtures { test: self }
    }
}

pub struct AccountFixtures<'a> {
    pub test: &'a mut TestContext,
}

impl<'a> AccountFixtures<'a> {
    /// Insert an account with the given name.
    pub async fn insert_account(&self, name: &str) -> Result<account::Model, TestError> {
        Ok(entity::prelude::Account::insert(account::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}
