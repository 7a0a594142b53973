//! Invitation aggregate root and its response state machine.

use super::{InvitationDomainError, InvitationId, ParseInvitationStatusError, TeamId};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invitation lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent, awaiting the invitee's response.
    Pending,
    /// Accepted by the invitee.
    Accepted,
    /// Rejected by the invitee or retracted by the inviter.
    Rejected,
}

impl InvitationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for InvitationStatus {
    type Error = ParseInvitationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseInvitationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The invitee's answer to a pending invitation.
///
/// Deliberately narrower than [`InvitationStatus`]: a response can never
/// put an invitation back into `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationResponse {
    /// Join the team.
    Accepted,
    /// Decline the invitation.
    Rejected,
}

impl InvitationResponse {
    /// Returns the status an invitation takes after this response.
    #[must_use]
    pub const fn into_status(self) -> InvitationStatus {
        match self {
            Self::Accepted => InvitationStatus::Accepted,
            Self::Rejected => InvitationStatus::Rejected,
        }
    }
}

/// Invitation aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    id: InvitationId,
    inviter_id: UserId,
    invitee_id: UserId,
    team_id: TeamId,
    status: InvitationStatus,
    message: String,
    response_message: Option<String>,
    responded_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted invitation aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedInvitationData {
    /// Persisted invitation identifier.
    pub id: InvitationId,
    /// Persisted inviter identifier.
    pub inviter_id: UserId,
    /// Persisted invitee identifier.
    pub invitee_id: UserId,
    /// Persisted target team identifier.
    pub team_id: TeamId,
    /// Persisted lifecycle status.
    pub status: InvitationStatus,
    /// Persisted inviter message.
    pub message: String,
    /// Persisted invitee reply, if responded.
    pub response_message: Option<String>,
    /// Persisted response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Persisted expiry deadline, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates a pending invitation to join a team.
    #[must_use]
    pub fn send(
        inviter_id: UserId,
        invitee_id: UserId,
        team_id: TeamId,
        message: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: InvitationId::new(),
            inviter_id,
            invitee_id,
            team_id,
            status: InvitationStatus::Pending,
            message: message.into(),
            response_message: None,
            responded_at: None,
            expires_at,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an invitation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedInvitationData) -> Self {
        Self {
            id: data.id,
            inviter_id: data.inviter_id,
            invitee_id: data.invitee_id,
            team_id: data.team_id,
            status: data.status,
            message: data.message,
            response_message: data.response_message,
            responded_at: data.responded_at,
            expires_at: data.expires_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the invitation identifier.
    #[must_use]
    pub const fn id(&self) -> InvitationId {
        self.id
    }

    /// Returns the inviter identifier.
    #[must_use]
    pub const fn inviter_id(&self) -> UserId {
        self.inviter_id
    }

    /// Returns the invitee identifier.
    #[must_use]
    pub const fn invitee_id(&self) -> UserId {
        self.invitee_id
    }

    /// Returns the target team identifier.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> InvitationStatus {
        self.status
    }

    /// Returns the inviter's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the invitee's reply, if responded.
    #[must_use]
    pub fn response_message(&self) -> Option<&str> {
        self.response_message.as_deref()
    }

    /// Returns when the invitee responded, if they have.
    #[must_use]
    pub const fn responded_at(&self) -> Option<DateTime<Utc>> {
        self.responded_at
    }

    /// Returns the expiry deadline, if any.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records the invitee's response.
    ///
    /// The pending check runs before the expiry check, so an invitation
    /// that was both answered and expired reports the response error.
    ///
    /// # Errors
    ///
    /// Returns [`InvitationDomainError::CannotRespondToInvitation`] unless
    /// the invitation is still [`InvitationStatus::Pending`], then
    /// [`InvitationDomainError::InvitationExpired`] when the deadline has
    /// passed.
    pub fn respond(
        &mut self,
        response: InvitationResponse,
        response_message: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), InvitationDomainError> {
        if self.status != InvitationStatus::Pending {
            return Err(InvitationDomainError::CannotRespondToInvitation {
                invitation_id: self.id,
                status: self.status,
            });
        }

        let now = clock.utc();
        if self.expires_at.is_some_and(|deadline| now > deadline) {
            return Err(InvitationDomainError::InvitationExpired {
                invitation_id: self.id,
            });
        }

        self.status = response.into_status();
        self.response_message = response_message;
        self.responded_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Retracts the invitation on behalf of the inviter.
    ///
    /// Forces the status to [`InvitationStatus::Rejected`] with no expiry
    /// check; the inviter may clean up even an expired invitation. The
    /// response timestamp is stamped so a retracted row stays consistent
    /// with the answered-state invariant.
    pub fn cancel(&mut self, clock: &impl Clock) {
        let now = clock.utc();
        self.status = InvitationStatus::Rejected;
        if self.responded_at.is_none() {
            self.responded_at = Some(now);
        }
        self.updated_at = now;
    }

    /// Returns whether the response timestamp matches the status.
    ///
    /// Holds by construction for every aggregate produced by this module;
    /// exposed so callers and tests can assert it on loaded records.
    #[must_use]
    pub const fn response_is_consistent(&self) -> bool {
        self.responded_at.is_some() == !matches!(self.status, InvitationStatus::Pending)
    }
}
