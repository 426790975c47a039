//! Data access layer repositories.
//!
//! One repository per table, each generic over sea-orm's `ConnectionTrait` so the same code
//! runs against the connection pool or inside a transaction.

pub mod account;
pub mod character_credential;
pub mod credential;
pub mod eve;
pub mod grant;
