//! Invitation workflow on the project service.

use super::{ProjectResult, ProjectService};
use crate::{
    identity::domain::UserId,
    project::{
        domain::{
            Invitation, InvitationId, InvitationResponse, MembershipChange, ProjectId, ProjectRole,
        },
        ports::{InvitationRepository, ProjectRepository},
    },
};
use mockable::Clock;
use tracing::info;

/// What happened when an invitation was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationResolution {
    /// The invitation, now removed from the collection.
    pub invitation: Invitation,
    /// The membership change for accepted invitations; `None` when rejected.
    pub membership: Option<MembershipChange>,
}

impl<P, I, C> ProjectService<P, I, C>
where
    P: ProjectRepository,
    I: InvitationRepository,
    C: Clock + Send + Sync,
{
    /// Creates and stores a pending invitation.
    ///
    /// Existing pending invitations for the same user and project are not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when persistence
    /// fails.
    pub async fn send_invitation(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        invited_by: UserId,
        role: ProjectRole,
    ) -> ProjectResult<Invitation> {
        let invitation = Invitation::new(project_id, user_id, invited_by, role, self.clock.utc());
        self.invitations.store(&invitation).await?;
        info!(
            invitation_id = %invitation.id,
            project_id = %project_id,
            user_id = %user_id,
            role = %role,
            "sent project invitation"
        );
        Ok(invitation)
    }

    /// Answers an invitation and removes it, whatever the answer.
    ///
    /// Accepting adds the invitee with the invited role, attributed to the
    /// inviter. Returns `Ok(None)` when the invitation does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError`] when adding the member or
    /// persistence fails.
    pub async fn respond_to_invitation(
        &self,
        invitation_id: InvitationId,
        response: InvitationResponse,
    ) -> ProjectResult<Option<InvitationResolution>> {
        let Some(invitation) = self.invitations.find_by_id(invitation_id).await? else {
            return Ok(None);
        };

        let membership = match response {
            InvitationResponse::Accepted => Some(
                self.add_member(
                    invitation.project_id,
                    invitation.user_id,
                    invitation.invited_by,
                    invitation.role,
                )
                .await?,
            ),
            InvitationResponse::Rejected => None,
        };

        self.invitations.remove(invitation_id).await?;
        info!(invitation_id = %invitation_id, response = ?response, "answered project invitation");
        Ok(Some(InvitationResolution {
            invitation,
            membership,
        }))
    }

    /// Finds an invitation by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when lookup fails.
    pub async fn find_invitation(
        &self,
        invitation_id: InvitationId,
    ) -> ProjectResult<Option<Invitation>> {
        Ok(self.invitations.find_by_id(invitation_id).await?)
    }

    /// Returns the pending invitations addressed to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when lookup fails.
    pub async fn invitations_for_user(&self, user_id: UserId) -> ProjectResult<Vec<Invitation>> {
        let invitations = self.invitations.list_all().await?;
        Ok(invitations
            .into_iter()
            .filter(|invitation| invitation.user_id == user_id)
            .collect())
    }

    /// Returns every pending invitation in send order.
    ///
    /// # Errors
    ///
    /// Returns [`super::ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_invitations(&self) -> ProjectResult<Vec<Invitation>> {
        Ok(self.invitations.list_all().await?)
    }
}
