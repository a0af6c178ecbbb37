//! In-memory invitation repository.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Invitation, InvitationId},
    ports::{InvitationRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory invitation repository preserving send order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvitationRepository {
    invitations: Arc<RwLock<IndexMap<InvitationId, Invitation>>>,
}

impl InMemoryInvitationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `invitations`.
    #[must_use]
    pub fn with_invitations(invitations: impl IntoIterator<Item = Invitation>) -> Self {
        let indexed = invitations
            .into_iter()
            .map(|invitation| (invitation.id, invitation))
            .collect();
        Self {
            invitations: Arc::new(RwLock::new(indexed)),
        }
    }
}

fn poisoned(err: &impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn store(&self, invitation: &Invitation) -> ProjectRepositoryResult<()> {
        let mut invitations = self.invitations.write().map_err(|err| poisoned(&err))?;
        if invitations.contains_key(&invitation.id) {
            return Err(ProjectRepositoryError::DuplicateInvitation(invitation.id));
        }
        invitations.insert(invitation.id, invitation.clone());
        Ok(())
    }

    async fn remove(&self, id: InvitationId) -> ProjectRepositoryResult<Option<Invitation>> {
        let mut invitations = self.invitations.write().map_err(|err| poisoned(&err))?;
        Ok(invitations.shift_remove(&id))
    }

    async fn find_by_id(&self, id: InvitationId) -> ProjectRepositoryResult<Option<Invitation>> {
        let invitations = self.invitations.read().map_err(|err| poisoned(&err))?;
        Ok(invitations.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Invitation>> {
        let invitations = self.invitations.read().map_err(|err| poisoned(&err))?;
        Ok(invitations.values().cloned().collect())
    }
}
