//! EVE Online entity repositories.
//!
//! Characters, corporations and alliances are keyed by their EVE Online IDs, which are unique
//! in the database. Rows are created with insert-or-ignore followed by a read so concurrent
//! first sightings of the same ID never produce duplicate rows or spurious errors.

pub mod alliance;
pub mod character;
pub mod corporation;
