//! Repository port for invitation persistence.
//!
//! Responses are single-shot, so the response write is guarded on the
//! stored status still being pending. Cancellation is deliberately
//! unguarded: the inviter's retraction is a last-write-wins overwrite, and
//! a race with a concurrent response resolves to whichever commits last.

use crate::invitation::domain::{Invitation, InvitationId, InvitationStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for invitation repository operations.
pub type InvitationRepositoryResult<T> = Result<T, InvitationRepositoryError>;

/// Invitation persistence contract.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Stores a new invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::DuplicateInvitation`] when the
    /// invitation ID already exists.
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()>;

    /// Finds an invitation by identifier.
    ///
    /// Returns `None` when the invitation does not exist.
    async fn find_by_id(
        &self,
        id: InvitationId,
    ) -> InvitationRepositoryResult<Option<Invitation>>;

    /// Persists a response, guarded on the stored status still being
    /// [`InvitationStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// does not exist and [`InvitationRepositoryError::StaleInvitation`]
    /// when another response or cancellation committed first.
    async fn update_response(&self, invitation: &Invitation) -> InvitationRepositoryResult<()>;

    /// Persists a cancellation unconditionally (last write wins).
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// does not exist.
    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()>;
}

/// Errors returned by invitation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum InvitationRepositoryError {
    /// An invitation with the same identifier already exists.
    #[error("duplicate invitation identifier: {0}")]
    DuplicateInvitation(InvitationId),

    /// The invitation was not found.
    #[error("invitation not found: {0}")]
    NotFound(InvitationId),

    /// A guarded response write lost a race: the invitation is no longer
    /// pending.
    #[error("invitation {invitation_id} already answered as {status}")]
    StaleInvitation {
        /// Target invitation.
        invitation_id: InvitationId,
        /// Status found in the store when the write was attempted.
        status: InvitationStatus,
    },

    /// The store could not be reached or locked within the caller's
    /// deadline; safe to retry.
    #[error("persistence backend busy: {0}")]
    Busy(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl InvitationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
