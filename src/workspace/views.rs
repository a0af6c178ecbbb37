//! Read models for the board and the dashboard.

use super::{Workspace, WorkspaceError, WorkspaceResult};
use crate::{
    project::domain::ProjectId,
    task::domain::{Task, TaskStatus},
};
use mockable::Clock;
use serde::Serialize;
use tracing::warn;

/// The three board columns of one project as the session user sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KanbanBoard {
    /// Tasks in `todo`.
    pub todo: Vec<Task>,
    /// Tasks in `inprogress`.
    pub in_progress: Vec<Task>,
    /// Tasks in `done`.
    pub done: Vec<Task>,
}

/// Task counts across the session user's projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Every task, whatever its status.
    pub total: usize,
    /// Tasks in `todo`.
    pub todo: usize,
    /// Tasks in `inprogress`.
    pub in_progress: usize,
    /// Tasks in `done`.
    pub done: usize,
}

impl<C> Workspace<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Builds the board of `project_id` honouring the visibility rule.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session or
    /// [`WorkspaceError::Forbidden`] when the session user is not a member.
    pub async fn kanban_board(&self, project_id: ProjectId) -> WorkspaceResult<KanbanBoard> {
        let user = self.session_user().await?;
        let Some(role) = self
            .projects
            .get_user_role_in_project(project_id, user.id())
            .await?
        else {
            warn!(user_id = %user.id(), project_id = %project_id, "refused: not a project member");
            return Err(WorkspaceError::Forbidden {
                action: "view this board",
            });
        };
        let visible = self
            .tasks
            .get_project_tasks(project_id, user.id(), Some(role))
            .await?;

        let mut board = KanbanBoard::default();
        for task in visible {
            match task.status() {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
                TaskStatus::Pending | TaskStatus::Rejected => {}
            }
        }
        Ok(board)
    }

    /// Counts the tasks of every project the session user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Unauthenticated`] without a session.
    pub async fn dashboard_summary(&self) -> WorkspaceResult<DashboardSummary> {
        let user = self.session_user().await?;
        let projects = self.projects.get_user_projects(user.id()).await?;
        let tasks = self.tasks.list_all().await?;

        let mut summary = DashboardSummary::default();
        for task in tasks
            .iter()
            .filter(|task| projects.iter().any(|project| project.id() == task.project_id()))
        {
            summary.total += 1;
            match task.status() {
                TaskStatus::Todo => summary.todo += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Done => summary.done += 1,
                TaskStatus::Pending | TaskStatus::Rejected => {}
            }
        }
        Ok(summary)
    }
}
