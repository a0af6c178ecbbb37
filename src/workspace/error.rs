//! Errors surfaced by workspace flows.

use super::{ConfigError, SnapshotError};
use crate::{
    identity::{domain::IdentityDomainError, services::IdentityError},
    notification::{domain::NotificationId, services::NotificationServiceError},
    project::{
        domain::{InvitationId, ProjectId},
        services::ProjectServiceError,
    },
    task::{
        domain::{TaskId, TaskStatus},
        services::TaskLifecycleError,
    },
    templates::TemplateError,
};
use thiserror::Error;

/// Errors returned by [`super::Workspace`] operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The flow needs a logged-in user.
    #[error("you must be logged in")]
    Unauthenticated,
    /// The session user lacks the rights the flow requires.
    #[error("you are not allowed to {action}")]
    Forbidden {
        /// What was attempted.
        action: &'static str,
    },
    /// Tasks can only be moved between board columns.
    #[error("tasks can only be moved into a board column, not {0}")]
    NotAColumn(TaskStatus),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),
    /// The notification does not point at an invitation.
    #[error("notification {0} does not carry an invitation")]
    NotAnInvitation(NotificationId),
    /// The invitation has already been answered or never existed.
    #[error("invitation not found: {0}")]
    InvitationNotFound(InvitationId),
    /// Input failed identity validation.
    #[error(transparent)]
    InvalidInput(#[from] IdentityDomainError),
    /// Identity operation failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Project operation failed.
    #[error(transparent)]
    Project(#[from] ProjectServiceError),
    /// Notification operation failed.
    #[error(transparent)]
    Notification(#[from] NotificationServiceError),
    /// Task operation failed.
    #[error(transparent)]
    Task(#[from] TaskLifecycleError),
    /// Message text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Snapshot persistence failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
