//! Repository port for bounty and application persistence.
//!
//! The decision and settlement engines move money-adjacent state, so every
//! status write here is guarded: implementations must re-check the prior
//! status inside the same atomic unit as the write and fail with a stale
//! status error when a concurrent caller has advanced the record first. A plain read-then-write is a correctness bug,
//! not an acceptable implementation.

use crate::bounty::domain::{
    Application, ApplicationId, ApplicationStatus, Bounty, BountyId, BountyStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for bounty repository operations.
pub type BountyRepositoryResult<T> = Result<T, BountyRepositoryError>;

/// Persistence contract for bounties and their applications.
///
/// Both record types live behind one port because the approval commit spans
/// them atomically.
#[async_trait]
pub trait BountyRepository: Send + Sync {
    /// Stores a newly posted bounty.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::DuplicateBounty`] when the bounty ID
    /// already exists.
    async fn store_bounty(&self, bounty: &Bounty) -> BountyRepositoryResult<()>;

    /// Stores a newly submitted application.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::DuplicateApplication`] when the
    /// application ID already exists.
    async fn store_application(&self, application: &Application) -> BountyRepositoryResult<()>;

    /// Finds a bounty by identifier.
    ///
    /// Returns `None` when the bounty does not exist.
    async fn find_bounty_by_id(&self, id: BountyId) -> BountyRepositoryResult<Option<Bounty>>;

    /// Finds an application by identifier.
    ///
    /// Returns `None` when the application does not exist.
    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<Application>>;

    /// Loads an application together with its owning bounty.
    ///
    /// Returns `None` when either record is missing.
    async fn find_application_with_bounty(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<(Application, Bounty)>>;

    /// Commits an application decision atomically.
    ///
    /// Persists the decided application, and the assigned bounty when one is
    /// given (approval). Both writes commit together or neither does. The
    /// commit succeeds only while the stored application is still pending
    /// and, on approval, the stored bounty is still
    /// [`BountyStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::ApplicationNotFound`] or
    /// [`BountyRepositoryError::BountyNotFound`] when a record vanished
    /// between load and write, [`BountyRepositoryError::StaleApplication`]
    /// when a concurrent decision won the race, and
    /// [`BountyRepositoryError::StaleBounty`] when the bounty left
    /// `Created` first.
    async fn commit_decision(
        &self,
        application: &Application,
        bounty: Option<&Bounty>,
    ) -> BountyRepositoryResult<()>;

    /// Persists a bounty status transition guarded on the prior status.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::BountyNotFound`] when the bounty
    /// does not exist and [`BountyRepositoryError::StaleBounty`] when the
    /// stored status no longer matches `expected`.
    async fn update_bounty_status(
        &self,
        bounty: &Bounty,
        expected: BountyStatus,
    ) -> BountyRepositoryResult<()>;
}

/// Errors returned by bounty repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BountyRepositoryError {
    /// A bounty with the same identifier already exists.
    #[error("duplicate bounty identifier: {0}")]
    DuplicateBounty(BountyId),

    /// An application with the same identifier already exists.
    #[error("duplicate application identifier: {0}")]
    DuplicateApplication(ApplicationId),

    /// The bounty was not found.
    #[error("bounty not found: {0}")]
    BountyNotFound(BountyId),

    /// The application was not found.
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// A guarded bounty write lost a race: the stored status has moved.
    #[error("bounty {bounty_id} already transitioned to {status}")]
    StaleBounty {
        /// Target bounty.
        bounty_id: BountyId,
        /// Status found in the store when the write was attempted.
        status: BountyStatus,
    },

    /// A guarded application write lost a race: the stored status has moved.
    #[error("application {application_id} already decided as {status}")]
    StaleApplication {
        /// Target application.
        application_id: ApplicationId,
        /// Status found in the store when the write was attempted.
        status: ApplicationStatus,
    },

    /// The store could not be reached or locked within the caller's
    /// deadline; safe to retry.
    #[error("persistence backend busy: {0}")]
    Busy(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BountyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
