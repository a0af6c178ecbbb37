//! Human-readable activity and notification text.
//!
//! Every message a user reads in an activity feed or notification mailbox
//! is rendered from one of the named templates below, so wording lives in a
//! single place.

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

/// Named message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    /// Seed activity for a new project.
    ProjectCreated,
    /// Activity logged when a member joins.
    MemberAdded,
    /// Activity logged when a task is created.
    TaskCreated,
    /// Activity logged when a task changes column.
    TaskMoved,
    /// Activity logged when an assignee accepts a pending task.
    TaskAccepted,
    /// Activity logged when an assignee rejects a pending task.
    TaskRejected,
    /// Notification sent to the assignee of a pending task.
    TaskAssignedNotice,
    /// Notification sent to a user added directly to a project.
    MemberAddedNotice,
    /// Notification carrying a project invitation.
    ProjectInvitationNotice,
    /// Terminal text of an accepted invitation notification.
    InvitationAcceptedNotice,
    /// Terminal text of an accepted task assignment notification.
    TaskAcceptedNotice,
    /// Terminal text of a rejected task assignment notification.
    TaskRejectedNotice,
}

impl MessageTemplate {
    /// Returns the template name used in error reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProjectCreated => "project_created",
            Self::MemberAdded => "member_added",
            Self::TaskCreated => "task_created",
            Self::TaskMoved => "task_moved",
            Self::TaskAccepted => "task_accepted",
            Self::TaskRejected => "task_rejected",
            Self::TaskAssignedNotice => "task_assigned_notice",
            Self::MemberAddedNotice => "member_added_notice",
            Self::ProjectInvitationNotice => "project_invitation_notice",
            Self::InvitationAcceptedNotice => "invitation_accepted_notice",
            Self::TaskAcceptedNotice => "task_accepted_notice",
            Self::TaskRejectedNotice => "task_rejected_notice",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::ProjectCreated => "{{ actor }} created the project",
            Self::MemberAdded => "New member added to the project ({{ role }})",
            Self::TaskCreated => "Task \"{{ title }}\" was created",
            Self::TaskMoved => "{{ actor }} moved \"{{ title }}\" to {{ column }}",
            Self::TaskAccepted => "Task \"{{ title }}\" was accepted",
            Self::TaskRejected => {
                "Task \"{{ title }}\" was rejected{% if reason %} (Reason: {{ reason }}){% endif %}"
            }
            Self::TaskAssignedNotice => "{{ actor }} assigned you a new task: \"{{ title }}\"",
            Self::MemberAddedNotice => "{{ actor }} added you to the project \"{{ project }}\"",
            Self::ProjectInvitationNotice => {
                "{{ actor }} invited you to join \"{{ project }}\" as {{ role }}"
            }
            Self::InvitationAcceptedNotice => "Invitation accepted",
            Self::TaskAcceptedNotice => "Task accepted: \"{{ title }}\"",
            Self::TaskRejectedNotice => "Task rejected: \"{{ title }}\"",
        }
    }

    /// Renders the template with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the context cannot be serialized or the
    /// template fails to evaluate.
    pub fn render(self, context: impl Serialize) -> Result<String, TemplateError> {
        Environment::new()
            .render_str(self.source(), context)
            .map_err(|error| TemplateError {
                template: self.name(),
                reason: error.to_string(),
            })
    }
}

/// Error returned when a message template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {template} message: {reason}")]
pub struct TemplateError {
    /// Template name.
    pub template: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}
