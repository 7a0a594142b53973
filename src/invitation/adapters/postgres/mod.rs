//! `PostgreSQL` adapters for invitation persistence.

mod models;
mod repository;
mod schema;

pub use repository::{InvitationPgPool, PostgresInvitationRepository};
