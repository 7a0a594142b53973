//! Thread-safe in-memory bounty repository for tests and in-process use.
//!
//! All guarded writes run under the single write lock, so the status check
//! and the write commit as one atomic unit exactly as the port requires.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::bounty::{
    domain::{Application, ApplicationId, ApplicationStatus, Bounty, BountyId, BountyStatus},
    ports::{BountyRepository, BountyRepositoryError, BountyRepositoryResult},
};

/// Thread-safe in-memory bounty repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBountyRepository {
    state: Arc<RwLock<InMemoryBountyState>>,
}

#[derive(Debug, Default)]
struct InMemoryBountyState {
    bounties: HashMap<BountyId, Bounty>,
    applications: HashMap<ApplicationId, Application>,
}

impl InMemoryBountyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> BountyRepositoryError {
    BountyRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks the stored application is still pending before a decision commit.
fn ensure_application_pending(
    state: &InMemoryBountyState,
    application: &Application,
) -> BountyRepositoryResult<()> {
    let stored = state
        .applications
        .get(&application.id())
        .ok_or(BountyRepositoryError::ApplicationNotFound(application.id()))?;
    if stored.status() != ApplicationStatus::Pending {
        return Err(BountyRepositoryError::StaleApplication {
            application_id: application.id(),
            status: stored.status(),
        });
    }
    Ok(())
}

/// Checks the stored bounty still carries the expected status.
fn ensure_bounty_status(
    state: &InMemoryBountyState,
    bounty: &Bounty,
    expected: BountyStatus,
) -> BountyRepositoryResult<()> {
    let stored = state
        .bounties
        .get(&bounty.id())
        .ok_or(BountyRepositoryError::BountyNotFound(bounty.id()))?;
    if stored.status() != expected {
        return Err(BountyRepositoryError::StaleBounty {
            bounty_id: bounty.id(),
            status: stored.status(),
        });
    }
    Ok(())
}

#[async_trait]
impl BountyRepository for InMemoryBountyRepository {
    async fn store_bounty(&self, bounty: &Bounty) -> BountyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.bounties.contains_key(&bounty.id()) {
            return Err(BountyRepositoryError::DuplicateBounty(bounty.id()));
        }
        state.bounties.insert(bounty.id(), bounty.clone());
        Ok(())
    }

    async fn store_application(&self, application: &Application) -> BountyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.applications.contains_key(&application.id()) {
            return Err(BountyRepositoryError::DuplicateApplication(application.id()));
        }
        state
            .applications
            .insert(application.id(), application.clone());
        Ok(())
    }

    async fn find_bounty_by_id(&self, id: BountyId) -> BountyRepositoryResult<Option<Bounty>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.bounties.get(&id).cloned())
    }

    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<Application>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.applications.get(&id).cloned())
    }

    async fn find_application_with_bounty(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<(Application, Bounty)>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let Some(application) = state.applications.get(&id).cloned() else {
            return Ok(None);
        };
        let bounty = state.bounties.get(&application.bounty_id()).cloned();
        Ok(bounty.map(|found| (application, found)))
    }

    async fn commit_decision(
        &self,
        application: &Application,
        bounty: Option<&Bounty>,
    ) -> BountyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;

        ensure_application_pending(&state, application)?;
        if let Some(assigned) = bounty {
            ensure_bounty_status(&state, assigned, BountyStatus::Created)?;
        }

        state
            .applications
            .insert(application.id(), application.clone());
        if let Some(assigned) = bounty {
            state.bounties.insert(assigned.id(), assigned.clone());
        }
        Ok(())
    }

    async fn update_bounty_status(
        &self,
        bounty: &Bounty,
        expected: BountyStatus,
    ) -> BountyRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        ensure_bounty_status(&state, bounty, expected)?;
        state.bounties.insert(bounty.id(), bounty.clone());
        Ok(())
    }
}
