//! Repository port for pending invitations.

use super::ProjectRepositoryResult;
use crate::project::domain::{Invitation, InvitationId};
use async_trait::async_trait;

/// Invitation persistence contract.
///
/// Duplicate pending invitations for the same project and user are allowed
/// to coexist.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Stores a new invitation.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectRepositoryError::DuplicateInvitation`] when
    /// the identifier already exists.
    async fn store(&self, invitation: &Invitation) -> ProjectRepositoryResult<()>;

    /// Removes an invitation, returning it when it existed.
    async fn remove(&self, id: InvitationId) -> ProjectRepositoryResult<Option<Invitation>>;

    /// Finds an invitation by identifier.
    async fn find_by_id(&self, id: InvitationId) -> ProjectRepositoryResult<Option<Invitation>>;

    /// Returns every invitation in the order they were sent.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Invitation>>;
}
