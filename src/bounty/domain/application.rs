//! Application aggregate: a worker's offer to fulfil a bounty.

use super::{ApplicationId, BountyDomainError, BountyId, ParseApplicationStatusError};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application decision status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, awaiting the poster's decision.
    Pending,
    /// Accepted by the poster; the bounty was assigned to the applicant.
    Accepted,
    /// Rejected by the poster.
    Rejected,
}

impl ApplicationStatus {
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

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application aggregate root.
///
/// Decided exactly once by the bounty poster; immutable afterwards within
/// this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    id: ApplicationId,
    bounty_id: BountyId,
    applicant_id: UserId,
    proposal: String,
    status: ApplicationStatus,
    reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted application aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Persisted application identifier.
    pub id: ApplicationId,
    /// Persisted owning bounty identifier.
    pub bounty_id: BountyId,
    /// Persisted applicant identifier.
    pub applicant_id: UserId,
    /// Persisted proposal text.
    pub proposal: String,
    /// Persisted decision status.
    pub status: ApplicationStatus,
    /// Persisted decision rationale, if decided.
    pub reason: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Creates a pending application for a bounty.
    #[must_use]
    pub fn submit(
        bounty_id: BountyId,
        applicant_id: UserId,
        proposal: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ApplicationId::new(),
            bounty_id,
            applicant_id,
            proposal: proposal.into(),
            status: ApplicationStatus::Pending,
            reason: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            bounty_id: data.bounty_id,
            applicant_id: data.applicant_id,
            proposal: data.proposal,
            status: data.status,
            reason: data.reason,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the owning bounty identifier.
    #[must_use]
    pub const fn bounty_id(&self) -> BountyId {
        self.bounty_id
    }

    /// Returns the applicant identifier.
    #[must_use]
    pub const fn applicant_id(&self) -> UserId {
        self.applicant_id
    }

    /// Returns the proposal text.
    #[must_use]
    pub fn proposal(&self) -> &str {
        &self.proposal
    }

    /// Returns the decision status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the decision rationale, if decided.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
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

    /// Marks the application accepted with the poster's rationale.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::ApplicationAlreadyDecided`] unless the
    /// application is still [`ApplicationStatus::Pending`].
    pub fn accept(
        &mut self,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        self.decide(ApplicationStatus::Accepted, reason.into(), clock)
    }

    /// Marks the application rejected with the poster's rationale.
    ///
    /// # Errors
    ///
    /// Returns [`BountyDomainError::ApplicationAlreadyDecided`] unless the
    /// application is still [`ApplicationStatus::Pending`].
    pub fn reject(
        &mut self,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        self.decide(ApplicationStatus::Rejected, reason.into(), clock)
    }

    fn decide(
        &mut self,
        decision: ApplicationStatus,
        reason: String,
        clock: &impl Clock,
    ) -> Result<(), BountyDomainError> {
        if self.status != ApplicationStatus::Pending {
            return Err(BountyDomainError::ApplicationAlreadyDecided {
                application_id: self.id,
                status: self.status,
            });
        }
        self.status = decision;
        self.reason = Some(reason);
        self.updated_at = clock.utc();
        Ok(())
    }
}
