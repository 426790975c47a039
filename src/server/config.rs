//! Environment-driven application configuration.

use std::net::SocketAddr;

use crate::server::{error::config::ConfigError, model::policy::CredentialKind};

const DEFAULT_KEY_API_URL: &str = "https://api.eveonline.com";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SWEEP_CONCURRENCY: usize = 8;

/// Application configuration loaded from environment variables.
pub struct Config {
    /// Contact email included in the user agent sent to the EVE API
    pub contact_email: String,
    /// Database connection URL
    pub database_url: String,
    /// Base URL of the EVE API serving key and character endpoints
    pub key_api_url: String,
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Raw recommended key mask; validated at pull time so a bad value fails closed
    pub recommended_key_mask: String,
    /// Key type credentials are expected to be
    pub recommended_key_kind: CredentialKind,
    /// Maximum number of credentials pulled in parallel by the sweep
    pub sweep_concurrency: usize,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable could not be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let recommended_key_mask = required("RECOMMENDED_KEY_MASK")?;
        if recommended_key_mask.trim().parse::<i64>().is_err() {
            tracing::error!(
                "RECOMMENDED_KEY_MASK MUST be an integer, got {:?}; no key will be verified until this is fixed",
                recommended_key_mask
            );
        }

        let kind = required("RECOMMENDED_KEY_KIND")?;
        let recommended_key_kind =
            CredentialKind::parse(&kind).ok_or_else(|| ConfigError::InvalidEnvValue {
                var: "RECOMMENDED_KEY_KIND".to_string(),
                reason: format!("expected Account, Character or Corporation, got {:?}", kind),
            })?;

        let listen_addr = optional("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidEnvValue {
                var: "LISTEN_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let sweep_concurrency = match optional("SWEEP_CONCURRENCY") {
            Some(value) => value
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidEnvValue {
                    var: "SWEEP_CONCURRENCY".to_string(),
                    reason: format!("expected a positive integer, got {:?}", value),
                })?,
            None => DEFAULT_SWEEP_CONCURRENCY,
        };

        Ok(Self {
            contact_email: required("CONTACT_EMAIL")?,
            database_url: required("DATABASE_URL")?,
            key_api_url: optional("KEY_API_URL").unwrap_or_else(|| DEFAULT_KEY_API_URL.to_string()),
            listen_addr,
            recommended_key_mask,
            recommended_key_kind,
            sweep_concurrency,
        })
    }

    /// User agent sent with every EVE API request
    pub fn user_agent(&self) -> String {
        format!(
            "keyward/{} ({})",
            env!("CARGO_PKG_VERSION"),
            self.contact_email
        )
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}
