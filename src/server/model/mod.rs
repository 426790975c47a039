//! Server application models and type definitions.
//!
//! Application state, database model type aliases, the capability mask used to interpret a
//! key's access bits, and the key policy deciding whether a credential is compliant.

pub mod app;
pub mod db;
pub mod mask;
pub mod policy;
