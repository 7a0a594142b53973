//! Application services for the invitation response workflow.

mod response;

pub use response::{
    InvitationResponseService, RespondToInvitationRequest, SendInvitationRequest,
};

use crate::invitation::{domain::InvitationDomainError, ports::InvitationRepositoryError};
use thiserror::Error;

/// Service-level errors for invitation operations.
#[derive(Debug, Error)]
pub enum InvitationLifecycleError {
    /// Domain validation or a transition guard failed.
    #[error(transparent)]
    Domain(#[from] InvitationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] InvitationRepositoryError),
}

/// Result type for invitation service operations.
pub type InvitationLifecycleResult<T> = Result<T, InvitationLifecycleError>;
