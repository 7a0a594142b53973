//! Bounty aggregate root and its lifecycle state machine.

use super::{BountyDomainError, BountyId, ParseBountyStatusError, Reward};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounty lifecycle status.
///
/// The engagement path is
/// `Created -> InProgress -> PendingSettlement -> Settled`; `Cancelled` is
/// an administrative terminal state set outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BountyStatus {
    /// Posted and open for applications; no receiver assigned.
    Created,
    /// An application was accepted and the receiver is working.
    InProgress,
    /// The receiver has requested settlement and awaits confirmation.
    PendingSettlement,
    /// The poster confirmed settlement; financially terminal.
    Settled,
    /// Withdrawn administratively before completion.
    Cancelled,
}

impl BountyStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::PendingSettlement => "pending_settlement",
            Self::Settled => "settled",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether a receiver must be assigned in this status.
    #[must_use]
    pub const fn requires_receiver(self) -> bool {
        matches!(self, Self::InProgress | Self::PendingSettlement | Self::Settled)
    }

    /// Returns whether no further lifecycle transition is defined.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Settled | Self::Cancelled)
    }
}

impl TryFrom<&str> for BountyStatus {
    type Error = ParseBountyStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "in_progress" => Ok(Self::InProgress),
            "pending_settlement" => Ok(Self::PendingSettlement),
            "settled" => Ok(Self::Settled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseBountyStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for BountyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounty aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    id: BountyId,
    poster_id: UserId,
    receiver_id: Option<UserId>,
    title: String,
    description: String,
    reward: Reward,
    status: BountyStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted bounty aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedBountyData {
    /// Persisted bounty identifier.
    pub id: BountyId,
    /// Persisted poster identifier.
    pub poster_id: UserId,
    /// Persisted receiver identifier, if assigned.
    pub receiver_id: Option<UserId>,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted reward.
    pub reward: Reward,
    /// Persisted lifecycle status.
    pub status: BountyStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Bounty {
    /// Creates a newly posted bounty with no receiver.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::EmptyTitle`] when the title is blank.
    pub fn post(
        poster_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        reward: Reward,
        clock: &impl Clock,
    ) -> Result<Self, BountyDomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(BountyDomainError::EmptyTitle);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: BountyId::new(),
            poster_id,
            receiver_id: None,
            title,
            description: description.into(),
            reward,
            status: BountyStatus::Created,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a bounty from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBountyData) -> Self {
        Self {
            id: data.id,
            poster_id: data.poster_id,
            receiver_id: data.receiver_id,
            title: data.title,
            description: data.description,
            reward: data.reward,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the bounty identifier.
    #[must_use]
    pub const fn id(&self) -> BountyId {
        self.id
    }

    /// Returns the poster identifier.
    #[must_use]
    pub const fn poster_id(&self) -> UserId {
        self.poster_id
    }

    /// Returns the assigned receiver, if any.
    #[must_use]
    pub const fn receiver_id(&self) -> Option<UserId> {
        self.receiver_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the reward.
    #[must_use]
    pub const fn reward(&self) -> &Reward {
        &self.reward
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BountyStatus {
        self.status
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

    /// Checks that the actor is the poster of this bounty.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::NotBountyOwner`] otherwise.
    pub fn ensure_poster(&self, user_id: UserId) -> Result<(), BountyDomainError> {
        if self.poster_id == user_id {
            Ok(())
        } else {
            Err(BountyDomainError::NotBountyOwner {
                bounty_id: self.id,
                user_id,
            })
        }
    }

    /// Assigns the bounty to a receiver as part of an application approval.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::BountyNotOpen`] when the bounty has
    /// already left [`BountyStatus::Created`].
    pub fn assign_to(
        &mut self,
        receiver_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        if self.status != BountyStatus::Created {
            return Err(BountyDomainError::BountyNotOpen {
                bounty_id: self.id,
                status: self.status,
            });
        }
        self.receiver_id = Some(receiver_id);
        self.status = BountyStatus::InProgress;
        self.touch(clock);
        Ok(())
    }

    /// Moves the bounty into `PendingSettlement` on behalf of the receiver.
    ///
    /// The status precondition is checked before the receiver check, so a
    /// repeated request reports the state error rather than an ownership
    /// mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::BountyNotInSettling`] unless the bounty
    /// is [`BountyStatus::InProgress`], then
    /// [`BountyDomainError::NotBountyReceiver`] unless the actor is the
    /// assigned receiver.
    pub fn request_settlement(
        &mut self,
        user_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        if self.status != BountyStatus::InProgress {
            return Err(BountyDomainError::BountyNotInSettling {
                bounty_id: self.id,
                status: self.status,
            });
        }
        if self.receiver_id != Some(user_id) {
            return Err(BountyDomainError::NotBountyReceiver {
                bounty_id: self.id,
                user_id,
            });
        }
        self.status = BountyStatus::PendingSettlement;
        self.touch(clock);
        Ok(())
    }

    /// Moves the bounty into `Settled` on behalf of the poster.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::BountyNotInPending`] unless the bounty
    /// is [`BountyStatus::PendingSettlement`], then
    /// [`BountyDomainError::NotBountyOwner`] unless the actor posted the
    /// bounty.
    pub fn confirm_settlement(
        &mut self,
        user_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        if self.status != BountyStatus::PendingSettlement {
            return Err(BountyDomainError::BountyNotInPending {
                bounty_id: self.id,
                status: self.status,
            });
        }
        self.ensure_poster(user_id)?;
        self.status = BountyStatus::Settled;
        self.touch(clock);
        Ok(())
    }

    /// Returns whether the receiver assignment matches the status.
    ///
    /// Holds by construction for every aggregate produced by this module;
    /// exposed so callers and tests can assert it on loaded records.
    #[must_use]
    pub const fn receiver_is_consistent(&self) -> bool {
        self.receiver_id.is_some() == self.status.requires_receiver()
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
