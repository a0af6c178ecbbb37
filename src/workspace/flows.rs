//! Session, project, and membership flows run on behalf of the session user.

use super::{Workspace, WorkspaceError, WorkspaceResult};
use crate::{
    identity::{
        domain::{EmailAddress, GlobalRole, User},
        services::RegisterUserRequest,
    },
    notification::domain::{
        NewNotification, Notification, NotificationId, NotificationKind, NotificationPayload,
    },
    project::{
        domain::{
            Invitation, InvitationId, InvitationResponse, MembershipChange, Project, ProjectId,
            ProjectRole,
        },
        services::{CreateProjectRequest, InvitationResolution},
    },
    templates::MessageTemplate,
};
use minijinja::context;
use mockable::Clock;
use tracing::{info, warn};

impl<C> Workspace<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Registers an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] for a taken email or invalid
    /// profile.
    pub async fn register(&self, request: RegisterUserRequest) -> WorkspaceResult<User> {
        Ok(self.identity.register(request).await?)
    }

    /// Logs in with an exact email and password pair.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] when the credentials match
    /// nobody.
    pub async fn login(&self, email: &str, password: &str) -> WorkspaceResult<User> {
        Ok(self.identity.login(email, password).await?)
    }

    /// Ends the session.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] when the session slot fails.
    pub async fn logout(&self) -> WorkspaceResult<()> {
        Ok(self.identity.logout().await?)
    }

    /// Returns the logged-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] when lookup fails.
    pub async fn current_user(&self) -> WorkspaceResult<Option<User>> {
        Ok(self.identity.current_user().await?)
    }

    /// Creates a project owned by the session user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session, or the
    /// project service error.
    pub async fn create_project(&self, request: CreateProjectRequest) -> WorkspaceResult<Project> {
        let creator = self.session_user().await?;
        Ok(self.projects.create_project(&creator.actor(), request).await?)
    }

    /// Returns the projects the session user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session.
    pub async fn my_projects(&self) -> WorkspaceResult<Vec<Project>> {
        let user = self.session_user().await?;
        Ok(self.projects.get_user_projects(user.id()).await?)
    }

    /// Invites `email` to a project, provisioning an account for unknown
    /// addresses, and drops an invitation prompt in the invitee's mailbox.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] unless the session user is an
    /// admin of the project, [`WorkspaceError::InvalidInput`] for a malformed
    /// address, or the underlying service error.
    pub async fn invite_member(
        &self,
        project_id: ProjectId,
        email: &str,
        role: ProjectRole,
    ) -> WorkspaceResult<Invitation> {
        let inviter = self.session_user().await?;
        let project = self.administered_project(project_id, &inviter, "invite members").await?;
        let invitee = self.find_or_provision(email).await?;

        let invitation = self
            .projects
            .send_invitation(project_id, invitee.id(), inviter.id(), role)
            .await?;
        let message = MessageTemplate::ProjectInvitationNotice.render(context! {
            actor => inviter.full_name(),
            project => project.name(),
            role => role.as_str()
        })?;
        self.notifications
            .create_notification(
                NewNotification::new(invitee.id(), NotificationKind::ProjectInvitation, message)
                    .with_payload(NotificationPayload::Invitation {
                        invitation_id: invitation.id.into_inner(),
                    }),
            )
            .await?;
        Ok(invitation)
    }

    /// Adds `email` to a project directly, provisioning an account for
    /// unknown addresses, and tells the new member.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] unless the session user is an
    /// admin of the project, [`WorkspaceError::InvalidInput`] for a malformed
    /// address, or the underlying service error.
    pub async fn add_member_by_email(
        &self,
        project_id: ProjectId,
        email: &str,
        role: ProjectRole,
    ) -> WorkspaceResult<MembershipChange> {
        let admin = self.session_user().await?;
        let project = self.administered_project(project_id, &admin, "add members").await?;
        let member = self.find_or_provision(email).await?;

        let change = self
            .projects
            .add_member(project_id, member.id(), admin.id(), role)
            .await?;
        if change == MembershipChange::Added {
            let message = MessageTemplate::MemberAddedNotice.render(context! {
                actor => admin.full_name(),
                project => project.name()
            })?;
            self.notifications
                .create_notification(NewNotification::new(
                    member.id(),
                    NotificationKind::MemberAdded,
                    message,
                ))
                .await?;
        }
        Ok(change)
    }

    /// Answers the invitation a mailbox prompt points at.
    ///
    /// Accepting turns the prompt into a read informational entry;
    /// rejecting deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] when the notification belongs
    /// to someone else, [`WorkspaceError::NotAnInvitation`] when it carries
    /// no invitation, or [`WorkspaceError::InvitationNotFound`] when the
    /// invitation was already answered.
    pub async fn respond_to_invitation_notification(
        &self,
        notification_id: NotificationId,
        response: InvitationResponse,
    ) -> WorkspaceResult<InvitationResolution> {
        let user = self.session_user().await?;
        let notification = self.owned_notification(notification_id, &user).await?;
        let Some(NotificationPayload::Invitation {
            invitation_id: raw_id,
        }) = notification.payload()
        else {
            return Err(WorkspaceError::NotAnInvitation(notification_id));
        };
        let invitation_id = InvitationId::from_uuid(raw_id);

        let resolution = self
            .projects
            .respond_to_invitation(invitation_id, response)
            .await?
            .ok_or(WorkspaceError::InvitationNotFound(invitation_id))?;

        match response {
            InvitationResponse::Accepted => {
                let message = MessageTemplate::InvitationAcceptedNotice.render(context!())?;
                self.notifications
                    .resolve(notification_id, message, NotificationKind::Info)
                    .await?;
            }
            InvitationResponse::Rejected => {
                self.notifications.delete_notification(notification_id).await?;
            }
        }
        info!(
            user_id = %user.id(),
            invitation_id = %invitation_id,
            response = ?response,
            "answered invitation from mailbox"
        );
        Ok(resolution)
    }

    /// Returns the session user's mailbox, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session.
    pub async fn my_notifications(&self) -> WorkspaceResult<Vec<Notification>> {
        let user = self.session_user().await?;
        Ok(self.notifications.get_user_notifications(user.id()).await?)
    }

    pub(super) async fn session_user(&self) -> WorkspaceResult<User> {
        self.identity
            .current_user()
            .await?
            .ok_or(WorkspaceError::Unauthenticated)
    }

    pub(super) async fn existing_project(&self, project_id: ProjectId) -> WorkspaceResult<Project> {
        self.projects
            .get_project_by_id(project_id)
            .await?
            .ok_or(WorkspaceError::ProjectNotFound(project_id))
    }

    async fn administered_project(
        &self,
        project_id: ProjectId,
        user: &User,
        action: &'static str,
    ) -> WorkspaceResult<Project> {
        let project = self.existing_project(project_id).await?;
        if project.role_of(user.id()) != Some(ProjectRole::Admin) {
            warn!(user_id = %user.id(), project_id = %project_id, action, "refused: not a project admin");
            return Err(WorkspaceError::Forbidden { action });
        }
        Ok(project)
    }

    async fn find_or_provision(&self, email: &str) -> WorkspaceResult<User> {
        let address = EmailAddress::new(email.trim())?;
        if let Some(existing) = self.identity.get_user_by_email(address.as_str()).await? {
            return Ok(existing);
        }
        Ok(self
            .identity
            .create_user_from_email(address, GlobalRole::User)
            .await?)
    }

    async fn owned_notification(
        &self,
        notification_id: NotificationId,
        user: &User,
    ) -> WorkspaceResult<Notification> {
        let notification = self
            .notifications
            .get_notification(notification_id)
            .await?
            .ok_or(WorkspaceError::NotificationNotFound(notification_id))?;
        if notification.user_id() != user.id() {
            warn!(user_id = %user.id(), notification_id = %notification_id, "refused: foreign notification");
            return Err(WorkspaceError::Forbidden {
                action: "answer someone else's notification",
            });
        }
        Ok(notification)
    }
}
