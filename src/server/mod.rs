//! Server application core modules.
//!
//! This module contains all server-side functionality for keyward: HTTP routing, database
//! repositories, the EVE API key client, credential reconciliation services, and the scheduled
//! sweep that keeps every stored key in sync with the EVE API.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod key_api;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
