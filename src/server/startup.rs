//! Startup wiring: database, EVE API client, shared state and the HTTP listener.

use std::{net::SocketAddr, sync::Arc};

use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    error::Error,
    key_api::http::HttpKeyApi,
    model::{app::AppState, policy::KeyPolicy},
    service::grant::DbGrantRevocationSink,
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the EVE API key client against the configured base URL
pub fn build_key_api(config: &Config) -> Result<HttpKeyApi, Error> {
    Ok(HttpKeyApi::new(&config.key_api_url, &config.user_agent())?)
}

/// Assemble the state shared by HTTP handlers and scheduled jobs
pub fn build_app_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let key_api = build_key_api(config)?;
    let policy = KeyPolicy::from_raw_mask(&config.recommended_key_mask, config.recommended_key_kind);

    Ok(AppState {
        grant_sink: Arc::new(DbGrantRevocationSink::new(db.clone())),
        key_api: Arc::new(key_api),
        policy: Arc::new(policy),
        db,
    })
}

/// Bind the HTTP listener on the configured address
pub async fn bind_listener(addr: SocketAddr) -> Result<TcpListener, Error> {
    let listener = TcpListener::bind(addr).await.inspect_err(|e| {
        tracing::error!(addr = %addr, "Failed to bind HTTP listener: {}", e);
    })?;

    Ok(listener)
}
