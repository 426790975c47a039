//! Reconciles EVE Online API keys against the EVE API, keeping character ownership,
//! key compliance, and downstream application grants in sync.

pub mod model;
pub mod server;
