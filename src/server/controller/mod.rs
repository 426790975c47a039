//! HTTP controller endpoints for the keyward web API.
//!
//! Axum handlers for operator accounts and their EVE API keys. Handlers build the relevant
//! service from the shared [`AppState`](crate::server::model::app::AppState), map results to
//! DTOs and let [`Error`](crate::server::error::Error) produce error responses. Every handler
//! is annotated for the generated OpenAPI document.

pub mod account;
pub mod credential;
