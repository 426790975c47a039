//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use keyward::server::{
    error::Error,
    key_api::http::HttpKeyApi,
    model::{
        app::AppState,
        policy::{CredentialKind, KeyPolicy},
    },
    service::grant::GrantRevocationSink,
};
use keyward_test_utils::{
    constant::{TEST_FULL_MASK, TEST_USER_AGENT},
    TestContext,
};

/// Grant sink remembering every character it was asked to revoke.
#[derive(Default)]
pub struct RecordingSink {
    revoked: Mutex<Vec<i64>>,
}

impl RecordingSink {
    pub fn revoked(&self) -> Vec<i64> {
        self.revoked.lock().unwrap().clone()
    }
}

#[async_trait]
impl GrantRevocationSink for RecordingSink {
    async fn revoke_grants_for_character(&self, character_id: i64) -> Result<(), Error> {
        self.revoked.lock().unwrap().push(character_id);

        Ok(())
    }
}

/// Policy recommending a `Character` key with [`TEST_FULL_MASK`].
pub fn test_policy() -> KeyPolicy {
    KeyPolicy::new(Some(TEST_FULL_MASK), CredentialKind::Character)
}

/// Extension trait wiring a [`TestContext`] into the application.
pub trait TestContextExt {
    /// EVE API client pointed at the mock server.
    fn key_api_client(&self) -> HttpKeyApi;

    /// Application state over the test database, the mock server and `sink`.
    fn app_state(&self, sink: Arc<RecordingSink>) -> AppState;
}

impl TestContextExt for TestContext {
    fn key_api_client(&self) -> HttpKeyApi {
        HttpKeyApi::new(self.api_url(), TEST_USER_AGENT).unwrap()
    }

    fn app_state(&self, sink: Arc<RecordingSink>) -> AppState {
        AppState {
            db: self.db.clone(),
            key_api: Arc::new(self.key_api_client()),
            grant_sink: sink,
            policy: Arc::new(test_policy()),
        }
    }
}
