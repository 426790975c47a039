//! Application state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    key_api::KeyApi, model::policy::KeyPolicy, service::grant::GrantRevocationSink,
};

/// State shared by HTTP handlers and scheduled jobs.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,
    /// EVE API key client.
    pub key_api: Arc<dyn KeyApi>,
    /// Receiver of grant revocations after a pull.
    pub grant_sink: Arc<dyn GrantRevocationSink>,
    /// Key type and mask every credential must meet.
    pub policy: Arc<KeyPolicy>,
}
