//! Application decision engine: the poster's accept/reject call.
//!
//! Approval is the only operation in the crate that mutates two records:
//! the application flips to `Accepted` and the owning bounty is assigned to
//! the applicant in the same atomic commit. A crash or conflict between the
//! two writes must leave both records untouched, which is why the service
//! hands both aggregates to [`BountyRepository::commit_decision`] instead
//! of persisting them separately.

use super::{BountyLifecycleError, BountyLifecycleResult};
use crate::bounty::{
    domain::{Application, ApplicationId, Bounty, BountyDomainError},
    ports::{BountyRepository, BountyRepositoryError},
};
use crate::identity::UserId;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for deciding an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecideApplicationRequest {
    application_id: ApplicationId,
    owner_id: UserId,
    reason: String,
}

impl DecideApplicationRequest {
    /// Creates a decision request.
    #[must_use]
    pub fn new(
        application_id: ApplicationId,
        owner_id: UserId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            application_id,
            owner_id,
            reason: reason.into(),
        }
    }
}

/// Decision orchestration service.
#[derive(Clone)]
pub struct ApplicationDecisionService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ApplicationDecisionService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new decision service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Approves an application on behalf of the bounty poster.
    ///
    /// Sibling pending applications on the same bounty are deliberately
    /// left untouched; the poster reviews them manually.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::ApplicationNotFound`] when the
    /// application is absent, [`BountyDomainError::NotBountyOwner`] when
    /// the actor did not post the bounty,
    /// [`BountyDomainError::ApplicationAlreadyDecided`] when the
    /// application was already decided (including concurrently), and
    /// [`BountyDomainError::BountyNotOpen`] when the bounty has left
    /// `Created`.
    pub async fn approve(
        &self,
        request: DecideApplicationRequest,
    ) -> BountyLifecycleResult<Application> {
        let (mut application, mut bounty) = self.load_pair(request.application_id).await?;
        bounty.ensure_poster(request.owner_id)?;

        application.accept(request.reason, &*self.clock)?;
        bounty.assign_to(application.applicant_id(), &*self.clock)?;

        self.repository
            .commit_decision(&application, Some(&bounty))
            .await
            .map_err(remap_decision_conflict)?;
        Ok(application)
    }

    /// Rejects an application on behalf of the bounty poster.
    ///
    /// Only the application record changes; the bounty stays untouched.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::approve`] except that the bounty status is
    /// irrelevant, so `BountyNotOpen` cannot occur.
    pub async fn reject(
        &self,
        request: DecideApplicationRequest,
    ) -> BountyLifecycleResult<Application> {
        let (mut application, bounty) = self.load_pair(request.application_id).await?;
        bounty.ensure_poster(request.owner_id)?;

        application.reject(request.reason, &*self.clock)?;

        self.repository
            .commit_decision(&application, None)
            .await
            .map_err(remap_decision_conflict)?;
        Ok(application)
    }

    async fn load_pair(
        &self,
        application_id: ApplicationId,
    ) -> BountyLifecycleResult<(Application, Bounty)> {
        let pair = self
            .repository
            .find_application_with_bounty(application_id)
            .await?
            .ok_or(BountyRepositoryError::ApplicationNotFound(application_id))?;
        Ok(pair)
    }
}

/// Translates a lost decision race into the matching precondition error.
///
/// The guarded commit fails with a stale-status error when another caller
/// decided the application or advanced the bounty first; by then the
/// precondition the loser validated no longer holds, so the caller sees the
/// same error an up-front check would have produced.
fn remap_decision_conflict(err: BountyRepositoryError) -> BountyLifecycleError {
    match err {
        BountyRepositoryError::StaleApplication {
            application_id,
            status,
        } => BountyLifecycleError::Domain(BountyDomainError::ApplicationAlreadyDecided {
            application_id,
            status,
        }),
        BountyRepositoryError::StaleBounty { bounty_id, status } => {
            BountyLifecycleError::Domain(BountyDomainError::BountyNotOpen { bounty_id, status })
        }
        other => BountyLifecycleError::Repository(other),
    }
}
