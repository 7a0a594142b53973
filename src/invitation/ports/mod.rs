//! Port contracts for the invitation response workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by invitation
//! services.

pub mod repository;

pub use repository::{
    InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult,
};
