//! Credential reconciliation.
//!
//! [`CredentialService`] owns the lifecycle of a registered EVE API key: registering it,
//! pulling it against the EVE API, evaluating its compliance with the [`KeyPolicy`], and
//! deleting it with the detach cascade that keeps character ownership consistent.

mod character;
mod detach;
mod pull;

pub use detach::{delete_credential_cascade, detach_character};

use chrono::{NaiveDateTime, Utc};
use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    data::{
        account::AccountRepository, credential::CredentialRepository,
        eve::character::CharacterRepository,
    },
    error::{credential::CredentialError, Error},
    key_api::KeyApi,
    model::{
        db::{CredentialModel, EveCharacterModel},
        policy::KeyPolicy,
    },
    service::grant::GrantRevocationSink,
};

/// Credential registration, reconciliation and cleanup.
pub struct CredentialService<'a> {
    db: &'a DatabaseConnection,
    key_api: &'a dyn KeyApi,
    grant_sink: &'a dyn GrantRevocationSink,
    policy: &'a KeyPolicy,
}

impl<'a> CredentialService<'a> {
    /// Creates a new instance of [`CredentialService`]
    pub fn new(
        db: &'a DatabaseConnection,
        key_api: &'a dyn KeyApi,
        grant_sink: &'a dyn GrantRevocationSink,
        policy: &'a KeyPolicy,
    ) -> Self {
        Self {
            db,
            key_api,
            grant_sink,
            policy,
        }
    }

    /// Registers a key for an account and pulls it immediately.
    ///
    /// # Returns
    /// - `Ok(CredentialModel)` - The registered and pulled credential
    /// - `Err(CredentialError::AccountNotFound)` - `owner_id` does not exist
    /// - `Err(CredentialError::KeyAlreadyRegistered)` - Another credential already uses `key`
    /// - `Err(CredentialError::KeyRejected)` - The EVE API answered 403; nothing was kept
    /// - `Err(Error::KeyApiError)` - Transient EVE API failure; the credential stays registered
    ///   and is retried by the next sweep
    pub async fn create_credential(
        &self,
        owner_id: i32,
        key: i64,
        code: &str,
    ) -> Result<CredentialModel, Error> {
        if AccountRepository::new(self.db)
            .get_by_id(owner_id)
            .await?
            .is_none()
        {
            return Err(CredentialError::AccountNotFound(owner_id).into());
        }

        let credential_repo = CredentialRepository::new(self.db);
        if credential_repo.get_by_key(key).await?.is_some() {
            return Err(CredentialError::KeyAlreadyRegistered(key).into());
        }

        let credential = match credential_repo.create(owner_id, key, code).await {
            Ok(credential) => credential,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(CredentialError::KeyAlreadyRegistered(key).into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(key = %key, owner_id = %owner_id, "Registered key");

        match self.pull(credential).await? {
            Some(credential) => Ok(credential),
            None => Err(CredentialError::KeyRejected(key).into()),
        }
    }

    /// Deletes a credential, detaching every character it no longer backs.
    pub async fn delete_credential(&self, credential: &CredentialModel) -> Result<(), Error> {
        delete_credential_cascade(self.db, credential, Utc::now().naive_utc()).await
    }

    /// Re-evaluates the `Kind`/`Mask` violation of a credential and persists it if it changed.
    ///
    /// A `Character` violation is left alone.
    pub async fn eval_violation(
        &self,
        credential: CredentialModel,
    ) -> Result<CredentialModel, Error> {
        let violation = self
            .policy
            .evaluate_violation(
                credential.violation,
                credential.kind.as_deref(),
                credential.mask,
            )
            .apply(credential.violation);

        if violation == credential.violation {
            return Ok(credential);
        }

        tracing::debug!(
            key = %credential.key,
            old = ?credential.violation,
            new = ?violation,
            "Updating key violation"
        );

        Ok(CredentialRepository::new(self.db)
            .update_violation(credential.id, violation)
            .await?)
    }

    /// Deletes every credential that expired at or before `now`.
    ///
    /// Each credential goes through the same detach cascade as a revoked key. Returns how many
    /// credentials were removed.
    pub async fn purge_expired(&self, now: NaiveDateTime) -> Result<usize, Error> {
        let expired = CredentialRepository::new(self.db).find_expired(now).await?;
        let count = expired.len();

        for credential in expired {
            tracing::debug!(key = %credential.key, expires = ?credential.expires, "Purging expired key");

            delete_credential_cascade(self.db, &credential, now).await?;
        }

        Ok(count)
    }

    /// Gets a live credential by key.
    pub async fn get_credential(&self, key: i64) -> Result<CredentialModel, Error> {
        let now = Utc::now().naive_utc();

        CredentialRepository::new(self.db)
            .get_by_key(key)
            .await?
            .filter(|credential| credential.expires.map_or(true, |expires| expires > now))
            .ok_or_else(|| CredentialError::NotFound(key).into())
    }

    /// Live credentials of an account together with the characters each one covers.
    pub async fn get_account_credentials(
        &self,
        account_id: i32,
    ) -> Result<Vec<(CredentialModel, Vec<EveCharacterModel>)>, Error> {
        if AccountRepository::new(self.db)
            .get_by_id(account_id)
            .await?
            .is_none()
        {
            return Err(CredentialError::AccountNotFound(account_id).into());
        }

        let credentials = CredentialRepository::new(self.db)
            .find_live_by_owner(account_id, Utc::now().naive_utc())
            .await?;

        let mut result = Vec::with_capacity(credentials.len());
        for credential in credentials {
            let characters = self.get_characters(&credential).await?;
            result.push((credential, characters));
        }

        Ok(result)
    }

    /// Characters a credential currently grants access to.
    pub async fn get_characters(
        &self,
        credential: &CredentialModel,
    ) -> Result<Vec<EveCharacterModel>, Error> {
        Ok(CharacterRepository::new(self.db)
            .get_by_credential(credential.id)
            .await?)
    }
}
