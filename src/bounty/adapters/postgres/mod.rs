//! `PostgreSQL` adapters for bounty persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BountyPgPool, PostgresBountyRepository};
