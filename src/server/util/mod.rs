//! Utility functions and helpers for server operations.
//!
//! Parsing of the EVE API's timestamp format and markup stripping for corporation titles,
//! both used when merging EVE API payloads into stored records.

pub mod text;
pub mod time;
