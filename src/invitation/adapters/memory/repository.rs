//! Thread-safe in-memory invitation repository for tests and in-process use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::invitation::{
    domain::{Invitation, InvitationId, InvitationStatus},
    ports::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult},
};

/// Thread-safe in-memory invitation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvitationRepository {
    state: Arc<RwLock<HashMap<InvitationId, Invitation>>>,
}

impl InMemoryInvitationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> InvitationRepositoryError {
    InvitationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.contains_key(&invitation.id()) {
            return Err(InvitationRepositoryError::DuplicateInvitation(
                invitation.id(),
            ));
        }
        state.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: InvitationId,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.get(&id).cloned())
    }

    async fn update_response(
        &self,
        invitation: &Invitation,
    ) -> InvitationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let stored = state
            .get(&invitation.id())
            .ok_or(InvitationRepositoryError::NotFound(invitation.id()))?;
        if stored.status() != InvitationStatus::Pending {
            return Err(InvitationRepositoryError::StaleInvitation {
                invitation_id: invitation.id(),
                status: stored.status(),
            });
        }
        state.insert(invitation.id(), invitation.clone());
        Ok(())
    }

    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if !state.contains_key(&invitation.id()) {
            return Err(InvitationRepositoryError::NotFound(invitation.id()));
        }
        state.insert(invitation.id(), invitation.clone());
        Ok(())
    }
}
