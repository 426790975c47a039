//! Data transfer objects shared by the HTTP API.

pub mod account;
pub mod api;
pub mod credential;
