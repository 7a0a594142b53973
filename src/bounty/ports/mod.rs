//! Port contracts for the bounty engagement lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by bounty services.

pub mod repository;

pub use repository::{BountyRepository, BountyRepositoryError, BountyRepositoryResult};
