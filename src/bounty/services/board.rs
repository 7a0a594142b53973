//! Service layer for posting bounties and submitting applications.

use super::BountyLifecycleResult;
use crate::bounty::{
    domain::{Application, ApplicationId, Bounty, BountyId, Reward},
    ports::{BountyRepository, BountyRepositoryError},
};
use crate::identity::UserId;
use mockable::Clock;
use std::sync::Arc;

/// Request payload for posting a bounty.
#[derive(Debug, Clone, PartialEq)]
pub struct PostBountyRequest {
    poster_id: UserId,
    title: String,
    description: String,
    reward_amount: f64,
    currency: String,
}

impl PostBountyRequest {
    /// Creates a request with required posting fields.
    #[must_use]
    pub fn new(
        poster_id: UserId,
        title: impl Into<String>,
        reward_amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            poster_id,
            title: title.into(),
            description: String::new(),
            reward_amount,
            currency: currency.into(),
        }
    }

    /// Sets the bounty description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for submitting an application on a bounty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitApplicationRequest {
    bounty_id: BountyId,
    applicant_id: UserId,
    proposal: String,
}

impl SubmitApplicationRequest {
    /// Creates a request with required application fields.
    #[must_use]
    pub fn new(bounty_id: BountyId, applicant_id: UserId, proposal: impl Into<String>) -> Self {
        Self {
            bounty_id,
            applicant_id,
            proposal: proposal.into(),
        }
    }
}

/// Posting and lookup service for bounties and applications.
#[derive(Clone)]
pub struct BountyBoardService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BountyBoardService<R, C>
where
    R: BountyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new bounty board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Posts a new bounty in the `Created` status with no receiver.
    ///
    /// # Errors
    ///
    /// Returns [`super::BountyLifecycleError`] when validation fails or the
    /// repository rejects persistence.
    pub async fn post_bounty(&self, request: PostBountyRequest) -> BountyLifecycleResult<Bounty> {
        let reward = Reward::new(request.reward_amount, request.currency)?;
        let bounty = Bounty::post(
            request.poster_id,
            request.title,
            request.description,
            reward,
            &*self.clock,
        )?;
        self.repository.store_bounty(&bounty).await?;
        Ok(bounty)
    }

    /// Retrieves a bounty by identifier.
    ///
    /// Returns `Ok(None)` when the bounty does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::BountyLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_bounty(&self, id: BountyId) -> BountyLifecycleResult<Option<Bounty>> {
        Ok(self.repository.find_bounty_by_id(id).await?)
    }

    /// Submits a pending application on an existing bounty.
    ///
    /// Workers may apply regardless of the bounty's status; only its
    /// existence is checked here. Late applications are harmless because
    /// the decision engine enforces openness at approval time.
    ///
    /// # Errors
    ///
    /// Returns [`BountyRepositoryError::BountyNotFound`] when the bounty is
    /// absent, or other repository errors on persistence failure.
    pub async fn submit_application(
        &self,
        request: SubmitApplicationRequest,
    ) -> BountyLifecycleResult<Application> {
        let bounty = self
            .repository
            .find_bounty_by_id(request.bounty_id)
            .await?
            .ok_or(BountyRepositoryError::BountyNotFound(request.bounty_id))?;

        let application = Application::submit(
            bounty.id(),
            request.applicant_id,
            request.proposal,
            &*self.clock,
        );
        self.repository.store_application(&application).await?;
        Ok(application)
    }

    /// Retrieves an application by identifier.
    ///
    /// Returns `Ok(None)` when the application does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::BountyLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn get_application(
        &self,
        id: ApplicationId,
    ) -> BountyLifecycleResult<Option<Application>> {
        Ok(self.repository.find_application_by_id(id).await?)
    }
}
