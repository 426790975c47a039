//! Test fixtures for database records and mock EVE API endpoints.
//!
//! - `account` - accounts
//! - `credential` - API credentials and their character links
//! - `eve` - alliances, corporations and characters
//! - `grant` - downstream application grants
//! - `key_api` - mock EVE API key endpoints and JSON payload factories

pub mod account;
pub mod credential;
pub mod eve;
pub mod grant;
pub mod key_api;
