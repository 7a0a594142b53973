//! Domain model for the invitation response workflow.
//!
//! Invitations are self-contained: the single `respond` transition checks
//! pending state first and expiry second, so an already-answered expired
//! invitation reports "cannot respond" rather than "expired".

mod error;
mod ids;
mod invitation;

pub use error::{InvitationDomainError, ParseInvitationStatusError};
pub use ids::{InvitationId, TeamId};
pub use invitation::{
    Invitation, InvitationResponse, InvitationStatus, PersistedInvitationData,
};

pub use crate::identity::UserId;
