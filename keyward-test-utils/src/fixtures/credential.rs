use chrono::{NaiveDateTime, Utc};
use entity::{eve_character_credential, eve_credential};
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_FULL_MASK, TEST_KEY_CODE},
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn credential<'a>(&'a mut self) -> CredentialFixtures<'a> {
        CredentialFixtures { test: self }
    }
}

pub struct CredentialFixtures<'a> {
    pub test: &'a mut TestContext,
}

impl<'a> CredentialFixtures<'a> {
    /// Insert a freshly registered credential: `Character` kind, mask 0, not verified.
    ///
    /// The verification code is [`TEST_KEY_CODE`].
    pub async fn insert_credential(
        &self,
        key: i64,
        owner_id: i32,
    ) -> Result<eve_credential::Model, TestError> {
        self.insert(key, owner_id, 0, false).await
    }

    /// Insert a credential that passed the key policy with [`TEST_FULL_MASK`].
    pub async fn insert_verified_credential(
        &self,
        key: i64,
        owner_id: i32,
    ) -> Result<eve_credential::Model, TestError> {
        self.insert(key, owner_id, TEST_FULL_MASK, true).await
    }

    async fn insert(
        &self,
        key: i64,
        owner_id: i32,
        mask: i64,
        verified: bool,
    ) -> Result<eve_credential::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::EveCredential::insert(eve_credential::ActiveModel {
                key: ActiveValue::Set(key),
                code: ActiveValue::Set(TEST_KEY_CODE.to_string()),
                kind: ActiveValue::Set(Some("Character".to_string())),
                mask: ActiveValue::Set(mask),
                verified: ActiveValue::Set(verified),
                violation: ActiveValue::Set(None),
                expires: ActiveValue::Set(None),
                owner_id: ActiveValue::Set(owner_id),
                created_at: ActiveValue::Set(now),
                modified: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Record that the credential with record ID `credential_id` grants access to a character.
    pub async fn link_character(
        &self,
        character_id: i32,
        credential_id: i32,
    ) -> Result<(), TestError> {
        entity::prelude::EveCharacterCredential::insert(eve_character_credential::ActiveModel {
            character_id: ActiveValue::Set(character_id),
            credential_id: ActiveValue::Set(credential_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        })
        .exec_without_returning(&self.test.db)
        .await?;

        Ok(())
    }

    /// Overwrite the expiry of a stored credential.
    pub async fn set_expires(
        &self,
        credential_id: i32,
        expires: Option<NaiveDateTime>,
    ) -> Result<eve_credential::Model, TestError> {
        let credential = entity::prelude::EveCredential::find_by_id(credential_id)
            .one(&self.test.db)
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound(format!("credential {}", credential_id))
            })?;

        let mut active: eve_credential::ActiveModel = credential.into();
        active.expires = ActiveValue::Set(expires);

        Ok(active.update(&self.test.db).await?)
    }
}
