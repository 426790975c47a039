use chrono::Utc;
use entity::application_grant;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn grant<'a>(&'a mut self) -> GrantFixtures<'a> {
        GrantFixtures { test: self }
    }
}

pub struct GrantFixtures<'a> {
    pub test: &'a mut TestContext,
}

impl<'a> GrantFixtures<'a> {
    /// Grant `application` access on behalf of the character with record ID `character_id`.
    pub async fn insert_grant(
        &self,
        character_id: i32,
        application: &str,
    ) -> Result<application_grant::Model, TestError> {
        Ok(
            entity::prelude::ApplicationGrant::insert(application_grant::ActiveModel {
                character_id: ActiveValue::Set(character_id),
                application: ActiveValue::Set(application.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
