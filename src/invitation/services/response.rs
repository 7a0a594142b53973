//! Invitation response engine: send, respond, cancel.

use super::{InvitationLifecycleError, InvitationLifecycleResult};
use crate::invitation::{
    domain::{
        Invitation, InvitationDomainError, InvitationId, InvitationResponse, TeamId,
    },
    ports::{InvitationRepository, InvitationRepositoryError},
};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for sending an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendInvitationRequest {
    inviter_id: UserId,
    invitee_id: UserId,
    team_id: TeamId,
    message: String,
    expires_at: Option<DateTime<Utc>>,
}

impl SendInvitationRequest {
    /// Creates a request with required invitation fields.
    #[must_use]
    pub fn new(inviter_id: UserId, invitee_id: UserId, team_id: TeamId) -> Self {
        Self {
            inviter_id,
            invitee_id,
            team_id,
            message: String::new(),
            expires_at: None,
        }
    }

    /// Sets the inviter's message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the expiry deadline.
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Request payload for responding to an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondToInvitationRequest {
    invitation_id: InvitationId,
    response: InvitationResponse,
    response_message: Option<String>,
}

impl RespondToInvitationRequest {
    /// Creates a response request.
    #[must_use]
    pub const fn new(invitation_id: InvitationId, response: InvitationResponse) -> Self {
        Self {
            invitation_id,
            response,
            response_message: None,
        }
    }

    /// Sets the invitee's reply message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.response_message = Some(message.into());
        self
    }
}

/// Invitation orchestration service.
#[derive(Clone)]
pub struct InvitationResponseService<R, C>
where
    R: InvitationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> InvitationResponseService<R, C>
where
    R: InvitationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new invitation service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Sends a pending invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationLifecycleError::Repository`] when persistence
    /// rejects the new record.
    pub async fn send(
        &self,
        request: SendInvitationRequest,
    ) -> InvitationLifecycleResult<Invitation> {
        let invitation = Invitation::send(
            request.inviter_id,
            request.invitee_id,
            request.team_id,
            request.message,
            request.expires_at,
            &*self.clock,
        );
        self.repository.store(&invitation).await?;
        Ok(invitation)
    }

    /// Retrieves an invitation by identifier.
    ///
    /// Returns `Ok(None)` when the invitation does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationLifecycleError::Repository`] when persistence
    /// lookup fails.
    pub async fn get(
        &self,
        id: InvitationId,
    ) -> InvitationLifecycleResult<Option<Invitation>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Records the invitee's response to a pending invitation.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// is absent,
    /// [`InvitationDomainError::CannotRespondToInvitation`] when it was
    /// already answered (including concurrently), and
    /// [`InvitationDomainError::InvitationExpired`] when the deadline has
    /// passed on a still-pending invitation.
    pub async fn respond(
        &self,
        request: RespondToInvitationRequest,
    ) -> InvitationLifecycleResult<Invitation> {
        let mut invitation = self.load(request.invitation_id).await?;
        invitation.respond(request.response, request.response_message, &*self.clock)?;

        self.repository
            .update_response(&invitation)
            .await
            .map_err(remap_response_conflict)?;
        Ok(invitation)
    }

    /// Retracts an invitation on behalf of the inviter.
    ///
    /// No pending or expiry check: the retraction overwrites whatever state
    /// the invitation is in, last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationRepositoryError::NotFound`] when the invitation
    /// is absent, or other repository errors on persistence failure.
    pub async fn cancel(&self, id: InvitationId) -> InvitationLifecycleResult<()> {
        let mut invitation = self.load(id).await?;
        invitation.cancel(&*self.clock);
        self.repository.update(&invitation).await?;
        Ok(())
    }

    async fn load(&self, id: InvitationId) -> InvitationLifecycleResult<Invitation> {
        let invitation = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(InvitationRepositoryError::NotFound(id))?;
        Ok(invitation)
    }
}

/// Translates a lost response race into the single-response error.
fn remap_response_conflict(err: InvitationRepositoryError) -> InvitationLifecycleError {
    match err {
        InvitationRepositoryError::StaleInvitation {
            invitation_id,
            status,
        } => InvitationLifecycleError::Domain(
            InvitationDomainError::CannotRespondToInvitation {
                invitation_id,
                status,
            },
        ),
        other => InvitationLifecycleError::Repository(other),
    }
}
