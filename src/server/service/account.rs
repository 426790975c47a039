//! Operator account management.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{account::AccountRepository, credential::CredentialRepository},
    error::{credential::CredentialError, Error},
    model::db::AccountModel,
    service::credential::delete_credential_cascade,
};

/// Operator account management.
pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    /// Creates a new instance of [`AccountService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account named `name`.
    pub async fn create_account(&self, name: &str) -> Result<AccountModel, Error> {
        let account = AccountRepository::new(self.db).create(name).await?;

        tracing::debug!(account_id = %account.id, "Created account");

        Ok(account)
    }

    /// Deletes an account and every credential it owns.
    ///
    /// Credentials are deleted through the regular detach cascade first so characters they
    /// covered lose their owner instead of being left claimed by a deleted account.
    ///
    /// # Returns
    /// - `Ok(())` - The account and its credentials are gone
    /// - `Err(CredentialError::AccountNotFound)` - No account with that ID
    pub async fn delete_account(&self, account_id: i32) -> Result<(), Error> {
        let account_repo = AccountRepository::new(self.db);

        if account_repo.get_by_id(account_id).await?.is_none() {
            return Err(CredentialError::AccountNotFound(account_id).into());
        }

        let now = Utc::now().naive_utc();
        let credentials = CredentialRepository::new(self.db)
            .find_by_owner(account_id)
            .await?;

        for credential in &credentials {
            delete_credential_cascade(self.db, credential, now).await?;
        }

        account_repo.delete(account_id).await?;

        tracing::info!(
            account_id = %account_id,
            credentials = credentials.len(),
            "Deleted account"
        );

        Ok(())
    }

    /// Accounts flagged as duplicates of `account_id`.
    pub async fn get_duplicates(&self, account_id: i32) -> Result<Vec<AccountModel>, Error> {
        let account_repo = AccountRepository::new(self.db);

        if account_repo.get_by_id(account_id).await?.is_none() {
            return Err(CredentialError::AccountNotFound(account_id).into());
        }

        Ok(account_repo.get_duplicates(account_id).await?)
    }
}
