//! Settlement engine: the two-step request/confirm handshake.
//!
//! Each step belongs to a different party. The receiver who performed the
//! work requests settlement; the poster who owes the reward confirms it.
//! Neither can run the other's step, so no single actor can finalise a
//! payout alone.

use super::{BountyLifecycleError, BountyLifecycleResult};
use crate::bounty::{
    domain::{Bounty, BountyDomainError, BountyId, BountyStatus},
    ports::{BountyRepository, BountyRepositoryError},
};
use crate::identity::UserId;
use mockable::Clock;
use std::sync::Arc;

/// Settlement orchestration service.
#[derive(Clone)]
pub struct SettlementService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SettlementService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new settlement service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Requests settlement on behalf of the assigned receiver.
    ///
    /// Succeeds at most once per bounty: the first caller moves the status
    /// from `InProgress` to `PendingSettlement` and every later request
    /// fails the state check, regardless of who makes it.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::BountyNotFound`] when the bounty is
    /// absent, [`BountyDomainError::BountyNotInSettling`] when the status
    /// is not `InProgress` (including a lost race), and
    /// [`BountyDomainError::NotBountyReceiver`] when the actor is not the
    /// assigned receiver.
    pub async fn request_settlement(
        &self,
        bounty_id: BountyId,
        receiver_id: UserId,
    ) -> BountyLifecycleResult<Bounty> {
        let mut bounty = self.load(bounty_id).await?;
        bounty.request_settlement(receiver_id, &*self.clock)?;

        self.repository
            .update_bounty_status(&bounty, BountyStatus::InProgress)
            .await
            .map_err(|err| remap_stale(err, SettlementStep::Request))?;
        Ok(bounty)
    }

    /// Confirms settlement on behalf of the bounty poster.
    ///
    /// Financially terminal: after this call no further transition is
    /// defined for the bounty.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::BountyNotFound`] when the bounty is
    /// absent, [`BountyDomainError::BountyNotInPending`] when no settlement
    /// request is pending (including a lost race), and
    /// [`BountyDomainError::NotBountyOwner`] when the actor did not post
    /// the bounty.
    pub async fn confirm_settlement(
        &self,
        bounty_id: BountyId,
        owner_id: UserId,
    ) -> BountyLifecycleResult<Bounty> {
        let mut bounty = self.load(bounty_id).await?;
        bounty.confirm_settlement(owner_id, &*self.clock)?;

        self.repository
            .update_bounty_status(&bounty, BountyStatus::PendingSettlement)
            .await
            .map_err(|err| remap_stale(err, SettlementStep::Confirm))?;
        Ok(bounty)
    }

    async fn load(&self, bounty_id: BountyId) -> BountyLifecycleResult<Bounty> {
        let bounty = self
            .repository
            .find_bounty_by_id(bounty_id)
            .await?
            .ok_or(BountyRepositoryError::BountyNotFound(bounty_id))?;
        Ok(bounty)
    }
}

#[derive(Clone, Copy)]
enum SettlementStep {
    Request,
    Confirm,
}

/// Translates a lost settlement race into the step's precondition error.
fn remap_stale(err: BountyRepositoryError, step: SettlementStep) -> BountyLifecycleError {
    match (err, step) {
        (BountyRepositoryError::StaleBounty { bounty_id, status }, SettlementStep::Request) => {
            BountyLifecycleError::Domain(BountyDomainError::BountyNotInSettling {
                bounty_id,
                status,
            })
        }
        (BountyRepositoryError::StaleBounty { bounty_id, status }, SettlementStep::Confirm) => {
            BountyLifecycleError::Domain(BountyDomainError::BountyNotInPending {
                bounty_id,
                status,
            })
        }
        (other, _) => BountyLifecycleError::Repository(other),
    }
}
