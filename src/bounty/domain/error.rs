//! Error types for bounty domain validation and transitions.

use super::{ApplicationId, ApplicationStatus, BountyId, BountyStatus};
use crate::identity::UserId;
use thiserror::Error;

/// Errors returned while constructing or transitioning bounty domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BountyDomainError {
    /// The bounty title is empty after trimming.
    #[error("bounty title must not be empty")]
    EmptyTitle,

    /// The reward amount is not finite or not strictly positive.
    #[error("invalid reward amount {0}, expected a positive finite value")]
    InvalidRewardAmount(f64),

    /// The currency code is empty or too long for storage.
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    /// The actor is not the poster of the bounty.
    #[error("user {user_id} is not the owner of bounty {bounty_id}")]
    NotBountyOwner {
        /// Target bounty.
        bounty_id: BountyId,
        /// Actor that failed the ownership check.
        user_id: UserId,
    },

    /// The actor is not the assigned receiver of the bounty.
    #[error("user {user_id} is not the receiver of bounty {bounty_id}")]
    NotBountyReceiver {
        /// Target bounty.
        bounty_id: BountyId,
        /// Actor that failed the receiver check.
        user_id: UserId,
    },

    /// The bounty has already left `Created` and cannot accept an
    /// application decision.
    #[error("bounty {bounty_id} is not open for acceptance (status: {status})")]
    BountyNotOpen {
        /// Target bounty.
        bounty_id: BountyId,
        /// Status observed at decision time.
        status: BountyStatus,
    },

    /// Settlement was requested while the bounty is not in progress.
    #[error("bounty {bounty_id} is not in a settling state (status: {status})")]
    BountyNotInSettling {
        /// Target bounty.
        bounty_id: BountyId,
        /// Status observed at request time.
        status: BountyStatus,
    },

    /// Settlement was confirmed while no settlement request is pending.
    #[error("bounty {bounty_id} has no pending settlement (status: {status})")]
    BountyNotInPending {
        /// Target bounty.
        bounty_id: BountyId,
        /// Status observed at confirmation time.
        status: BountyStatus,
    },

    /// The application has already been accepted or rejected.
    #[error("application {application_id} has already been decided (status: {status})")]
    ApplicationAlreadyDecided {
        /// Target application.
        application_id: ApplicationId,
        /// Status observed at decision time.
        status: ApplicationStatus,
    },
}

/// Error returned while parsing bounty statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown bounty status: {0}")]
pub struct ParseBountyStatusError(pub String);

/// Error returned while parsing application statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
