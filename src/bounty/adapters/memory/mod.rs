//! In-memory adapters for bounty persistence.

mod repository;

pub use repository::InMemoryBountyRepository;
