//! Task flows: creation, assignment answers, acknowledgement, and moves.

use super::{Workspace, WorkspaceError, WorkspaceResult};
use crate::{
    identity::domain::User,
    notification::domain::NotificationKind,
    project::domain::ProjectRole,
    task::{
        domain::{Task, TaskId, TaskStatus, TaskUpdate},
        services::{CreateTaskRequest, TransitionOutcome},
    },
    templates::MessageTemplate,
};
use minijinja::context;
use mockable::Clock;
use tracing::{debug, warn};

impl<C> Workspace<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a task as the session user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session,
    /// [`WorkspaceError::Forbidden`] when the session user is not a member of
    /// the project, or the task engine error.
    pub async fn create_task(&self, request: CreateTaskRequest) -> WorkspaceResult<Task> {
        let creator = self.session_user().await?;
        let project_id = request.project_id();
        let project = self.existing_project(project_id).await?;
        if !project.is_member(creator.id()) {
            warn!(user_id = %creator.id(), project_id = %project_id, "refused: not a project member");
            return Err(WorkspaceError::Forbidden {
                action: "create tasks in this project",
            });
        }
        Ok(self.tasks.create_task(&creator.actor(), request).await?)
    }

    /// Accepts a pending task and turns its assignment notice into a read
    /// informational entry.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] unless the session user is the
    /// assignee or a project admin.
    pub async fn accept_assigned_task(&self, task_id: TaskId) -> WorkspaceResult<TransitionOutcome> {
        let user = self.session_user().await?;
        let task = self.answerable_task(task_id, &user).await?;
        let outcome = self.tasks.accept_task(&user.actor(), task.id()).await?;
        if let TransitionOutcome::Applied(accepted) = &outcome {
            let message =
                MessageTemplate::TaskAcceptedNotice.render(context! { title => accepted.title() })?;
            self.resolve_assignment_notice(accepted, message, NotificationKind::Info)
                .await?;
        }
        Ok(outcome)
    }

    /// Rejects a pending task and turns its assignment notice into a read
    /// error entry.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] unless the session user is the
    /// assignee or a project admin.
    pub async fn reject_assigned_task(
        &self,
        task_id: TaskId,
        reason: &str,
    ) -> WorkspaceResult<TransitionOutcome> {
        let user = self.session_user().await?;
        let task = self.answerable_task(task_id, &user).await?;
        let outcome = self.tasks.reject_task(&user.actor(), task.id(), reason).await?;
        if let TransitionOutcome::Applied(rejected) = &outcome {
            let message =
                MessageTemplate::TaskRejectedNotice.render(context! { title => rejected.title() })?;
            self.resolve_assignment_notice(rejected, message, NotificationKind::Error)
                .await?;
        }
        Ok(outcome)
    }

    /// Acknowledges a rejected task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Forbidden`] unless the session user is an
    /// admin of the task's project.
    pub async fn acknowledge_rejection(&self, task_id: TaskId) -> WorkspaceResult<TransitionOutcome> {
        let user = self.session_user().await?;
        let task = self.existing_task(task_id).await?;
        let role = self
            .projects
            .get_user_role_in_project(task.project_id(), user.id())
            .await?;
        if role != Some(ProjectRole::Admin) {
            warn!(user_id = %user.id(), task_id = %task_id, "refused: not a project admin");
            return Err(WorkspaceError::Forbidden {
                action: "acknowledge rejected tasks",
            });
        }
        Ok(self
            .tasks
            .acknowledge_rejected_task(&user.actor(), task_id)
            .await?)
    }

    /// Moves a task to another board column.
    ///
    /// Project `user`s may only move tasks assigned to them. The move is
    /// logged under the session user's full name.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAColumn`] for a status outside the
    /// board, or [`WorkspaceError::Forbidden`] when the session user may not
    /// move the task.
    pub async fn move_task(&self, task_id: TaskId, status: TaskStatus) -> WorkspaceResult<Task> {
        let user = self.session_user().await?;
        if !status.is_kanban() {
            return Err(WorkspaceError::NotAColumn(status));
        }
        let task = self.existing_task(task_id).await?;
        let role = self
            .projects
            .get_user_role_in_project(task.project_id(), user.id())
            .await?;
        let allowed = match role {
            Some(ProjectRole::Admin) => true,
            Some(ProjectRole::User) => task.assignee_id() == user.id(),
            None => false,
        };
        if !allowed {
            warn!(user_id = %user.id(), task_id = %task_id, "refused: task move not permitted");
            return Err(WorkspaceError::Forbidden {
                action: "move this task",
            });
        }

        let name = user.full_name();
        self.tasks
            .update_task(
                &user.actor(),
                task_id,
                TaskUpdate::status(status),
                Some(name.as_str()),
            )
            .await?
            .ok_or(WorkspaceError::TaskNotFound(task_id))
    }

    async fn existing_task(&self, task_id: TaskId) -> WorkspaceResult<Task> {
        self.tasks
            .get_task_by_id(task_id)
            .await?
            .ok_or(WorkspaceError::TaskNotFound(task_id))
    }

    async fn answerable_task(&self, task_id: TaskId, user: &User) -> WorkspaceResult<Task> {
        let task = self.existing_task(task_id).await?;
        if task.assignee_id() == user.id() {
            return Ok(task);
        }
        let role = self
            .projects
            .get_user_role_in_project(task.project_id(), user.id())
            .await?;
        if role == Some(ProjectRole::Admin) {
            return Ok(task);
        }
        warn!(user_id = %user.id(), task_id = %task_id, "refused: not the assignee");
        Err(WorkspaceError::Forbidden {
            action: "answer this assignment",
        })
    }

    async fn resolve_assignment_notice(
        &self,
        task: &Task,
        message: String,
        kind: NotificationKind,
    ) -> WorkspaceResult<()> {
        match self.notifications.find_by_task(task.id().into_inner()).await? {
            Some(notice) => {
                self.notifications.resolve(notice.id(), message, kind).await?;
            }
            None => debug!(task_id = %task.id(), "no assignment notice to resolve"),
        }
        Ok(())
    }
}
