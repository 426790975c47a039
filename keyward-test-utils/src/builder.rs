//! Declarative test builder.
//!
//! Tables and mock endpoints are queued on the builder and created during `build()`.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Methods can be chained and finalized with `build()` to create a [`TestContext`].
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_credential_tables: bool,
    accounts: Vec<String>,
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_credential_tables: false,
            accounts: Vec::new(),
            mock_builders: Vec::new(),
        }
    }

    /// Add every table used by credential reconciliation, in foreign key order.
    pub fn with_credential_tables(mut self) -> Self {
        self.include_credential_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use keyward_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), keyward_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(EveAlliance)
    ///     .with_table(EveCorporation)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an account with the given name during `build()`.
    ///
    /// Requires the account table, usually through [`Self::with_credential_tables`].
    pub fn with_account(mut self, name: impl Into<String>) -> Self {
        self.accounts.push(name.into());
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    ///
    /// Custom endpoints are created before anything else, so a test can register an error
    /// response ahead of a success response for the same path.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Database tables, fixtures and mock endpoints are in place
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut test = TestContext::new().await?;

        let mut all_tables = Vec::new();
        if self.include_credential_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Account),
                schema.create_table_from_entity(entity::prelude::EveAlliance),
                schema.create_table_from_entity(entity::prelude::EveCorporation),
                schema.create_table_from_entity(entity::prelude::EveCharacter),
                schema.create_table_from_entity(entity::prelude::EveCredential),
                schema.create_table_from_entity(entity::prelude::EveCharacterCredential),
                schema.create_table_from_entity(entity::prelude::AccountDuplicate),
                schema.create_table_from_entity(entity::prelude::ApplicationGrant),
            ]);
        }
        all_tables.extend(self.tables);
        test.with_tables(all_tables).await?;

        for name in self.accounts {
            test.account().insert_account(&name).await?;
        }

        for builder in self.mock_builders {
            let mock = builder(&mut test.server);
            test.mocks.push(mock);
        }

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
