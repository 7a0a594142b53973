//! Error types for invitation domain validation and transitions.

use super::{InvitationId, InvitationStatus};
use thiserror::Error;

/// Errors returned while transitioning invitation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvitationDomainError {
    /// The invitation has already been answered or retracted.
    #[error("cannot respond to invitation {invitation_id} (status: {status})")]
    CannotRespondToInvitation {
        /// Target invitation.
        invitation_id: InvitationId,
        /// Status observed at response time.
        status: InvitationStatus,
    },

    /// The invitation passed its expiry before the invitee responded.
    #[error("invitation {invitation_id} has expired")]
    InvitationExpired {
        /// Target invitation.
        invitation_id: InvitationId,
    },
}

/// Error returned while parsing invitation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invitation status: {0}")]
pub struct ParseInvitationStatusError(pub String);
