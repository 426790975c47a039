//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories and the EVE API key client: the credential service runs
//! the pull reconciliation for a single key, the identity registry resolves characters and
//! their corporation/alliance membership, the account service manages operator accounts, and
//! the grant module defines where revocations of downstream permissions are sent.

pub mod account;
pub mod credential;
pub mod eve;
pub mod grant;
