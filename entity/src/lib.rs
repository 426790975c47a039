//! SeaORM entity models for the keyward database schema.

pub mod prelude;

pub mod account;
pub mod account_duplicate;
pub mod application_grant;
pub mod eve_alliance;
pub mod eve_character;
pub mod eve_character_credential;
pub mod eve_corporation;
pub mod eve_credential;
