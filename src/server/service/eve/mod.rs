//! EVE Online entity services.

pub mod identity;
