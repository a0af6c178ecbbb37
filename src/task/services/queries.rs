//! Read-only task queries and the visibility rule.

use super::{TaskLifecycleResult, TaskLifecycleService};
use crate::{
    identity::domain::UserId,
    notification::ports::NotificationSink,
    project::{
        domain::{ProjectId, ProjectRole},
        ports::ActivityLog,
    },
    task::{
        domain::{Task, TaskId, TaskStatus},
        ports::TaskRepository,
    },
};
use mockable::Clock;

impl<R, A, N, C> TaskLifecycleService<R, A, N, C>
where
    R: TaskRepository,
    A: ActivityLog,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_task_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Returns every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_all().await?)
    }

    /// Returns the tasks of a project visible to `user_id`.
    ///
    /// Project `user`s only see tasks assigned to them; any other role,
    /// including none, sees every task of the project.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_project_tasks(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        role: Option<ProjectRole>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let own_only = role == Some(ProjectRole::User);
        self.select(|task| {
            task.project_id() == project_id && (!own_only || task.assignee_id() == user_id)
        })
        .await
    }

    /// Returns the visible tasks of a project in one status.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_tasks_by_status(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
        user_id: UserId,
        role: Option<ProjectRole>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let visible = self.get_project_tasks(project_id, user_id, role).await?;
        Ok(visible
            .into_iter()
            .filter(|task| task.status() == status)
            .collect())
    }

    /// Returns the pending tasks of a project awaiting `user_id`'s answer.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_pending_tasks(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.select(|task| {
            task.project_id() == project_id
                && task.assignee_id() == user_id
                && task.status() == TaskStatus::Pending
        })
        .await
    }

    /// Returns every pending task of a project, whoever it awaits.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_project_pending_tasks(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.select(|task| {
            task.project_id() == project_id && task.status() == TaskStatus::Pending
        })
        .await
    }

    /// Returns the rejected tasks of a project nobody has acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Repository`] when lookup fails.
    pub async fn get_unacknowledged_rejections(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        self.select(|task| task.project_id() == project_id && task.awaits_acknowledgement())
            .await
    }

    async fn select(
        &self,
        keep: impl Fn(&Task) -> bool + Send,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let tasks = self.tasks.list_all().await?;
        Ok(tasks.into_iter().filter(|task| keep(task)).collect())
    }
}
