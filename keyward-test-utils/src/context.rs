//! Test context structure and utilities.
//!
//! The `TestContext` returned by `TestBuilder` holds an in-memory SQLite database and a
//! mockito server standing in for the EVE API.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test environment built by [`TestBuilder`](crate::TestBuilder).
///
/// ```ignore
/// let mut test = TestBuilder::new().with_credential_tables().build().await?;
///
/// let account = test.account().insert_account("alice").await?;
/// test.key_api().create_key_info_endpoint(1001, body, 1);
///
/// let key_api = HttpKeyApi::new(test.api_url(), TEST_USER_AGENT)?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server for EVE API endpoints
    pub(crate) server: ServerGuard,
    /// Collection of mock HTTP endpoints for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Create a new test context with an empty database and a fresh mock server.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    /// Base URL of the mock EVE API
    pub fn api_url(&self) -> String {
        self.server.url()
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Keep a mock alive for the rest of the test and include it in [`Self::assert_mocks`].
    pub fn keep_mock(&mut self, mock: Mock) {
        self.mocks.push(mock);
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
