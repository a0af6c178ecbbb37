//! Service layer for task creation, updates, and state transitions.

use crate::{
    identity::domain::{Actor, UserId},
    notification::{
        domain::{NewNotification, NotificationKind, NotificationPayload},
        ports::{NotificationSink, NotificationSinkError},
    },
    project::{
        domain::{NewActivity, ProjectId},
        ports::{ActivityLog, ActivityLogError},
    },
    task::{
        domain::{
            Difficulty, NewTask, Priority, Task, TaskDomainError, TaskId, TaskStatus, TaskUpdate,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
    templates::{MessageTemplate, TemplateError},
};
use chrono::{DateTime, Utc};
use minijinja::context;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reason recorded when a task is rejected without one.
pub const DEFAULT_REJECTION_REASON: &str = "Rejected by the assignee";

/// Request payload for creating a task.
///
/// The assignee and status are requests: non-admin creators always get a
/// self-assigned `todo` task, and an admin assigning someone else always
/// starts the task in `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    assignee_id: Option<UserId>,
    priority: Priority,
    difficulty: Difficulty,
    status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Creates a request with medium priority and difficulty.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            assignee_id: None,
            priority: Priority::default(),
            difficulty: Difficulty::default(),
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Requests an assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the difficulty.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Requests an initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the project the task will belong to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    fn placement(&self, creator: &Actor) -> (UserId, TaskStatus) {
        if !creator.is_admin() {
            return (creator.id, TaskStatus::Todo);
        }
        let assignee_id = self.assignee_id.unwrap_or(creator.id);
        if assignee_id != creator.id {
            return (assignee_id, TaskStatus::Pending);
        }
        let status = self
            .status
            .filter(|requested| requested.is_kanban())
            .unwrap_or(TaskStatus::Todo);
        (assignee_id, status)
    }
}

/// Result of a guarded state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition happened; carries the updated task.
    Applied(Task),
    /// No task has the given identifier.
    NotFound,
    /// The task was not in the status the transition requires.
    InvalidState {
        /// Status the task was in.
        current: TaskStatus,
    },
}

impl TransitionOutcome {
    /// Returns `true` when the transition happened.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Returns the updated task when the transition happened.
    #[must_use]
    pub fn into_task(self) -> Option<Task> {
        match self {
            Self::Applied(task) => Some(task),
            Self::NotFound | Self::InvalidState { .. } => None,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Activity could not be logged.
    #[error(transparent)]
    Activity(#[from] ActivityLogError),
    /// Notification could not be delivered.
    #[error(transparent)]
    Notification(#[from] NotificationSinkError),
    /// Message text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Activity logging and notification delivery are injected capabilities so
/// the engine never reaches into the project or notification stores.
#[derive(Clone)]
pub struct TaskLifecycleService<R, A, N, C>
where
    R: TaskRepository,
    A: ActivityLog,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    pub(super) tasks: Arc<R>,
    activity: Arc<A>,
    notifications: Arc<N>,
    clock: Arc<C>,
}

impl<R, A, N, C> TaskLifecycleService<R, A, N, C>
where
    R: TaskRepository,
    A: ActivityLog,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, activity: Arc<A>, notifications: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            activity,
            notifications,
            clock,
        }
    }

    /// Creates a task, logs it, and notifies the assignee of a pending
    /// assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the title is blank, message text
    /// cannot be rendered, or a side effect fails.
    pub async fn create_task(
        &self,
        creator: &Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let (assignee_id, status) = request.placement(creator);
        let task = Task::new(
            NewTask {
                project_id: request.project_id,
                title: request.title,
                description: request.description,
                assignee_id,
                priority: request.priority,
                difficulty: request.difficulty,
                status,
                created_by: creator.id,
            },
            self.clock.utc(),
        )?;

        let created = MessageTemplate::TaskCreated.render(context! { title => task.title() })?;
        let notice = if status == TaskStatus::Pending {
            Some(MessageTemplate::TaskAssignedNotice.render(context! {
                actor => creator.first_name,
                title => task.title()
            })?)
        } else {
            None
        };

        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            assignee_id = %assignee_id,
            status = %status,
            "created task"
        );
        self.log_activity(task.project_id(), creator.id, created).await?;

        if let Some(message) = notice {
            let payload = NotificationPayload::Task {
                task_id: task.id().into_inner(),
            };
            self.notifications
                .notify(
                    NewNotification::new(assignee_id, NotificationKind::TaskAssigned, message)
                        .with_payload(payload),
                )
                .await?;
        }
        Ok(task)
    }

    /// Merges a free-form update into a task.
    ///
    /// A status change is logged as a move, attributed to `display_name` or
    /// the actor's full name. No authorization is applied here. Returns
    /// `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the new title is blank or a side
    /// effect fails.
    pub async fn update_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        update: TaskUpdate,
        display_name: Option<&str>,
    ) -> TaskLifecycleResult<Option<Task>> {
        let Some(mut task) = self.tasks.find_by_id(task_id).await? else {
            debug!(task_id = %task_id, "update skipped; task not found");
            return Ok(None);
        };

        let previous = task.apply(update)?;
        let moved = match previous {
            Some(_) => Some(MessageTemplate::TaskMoved.render(context! {
                actor => display_name.unwrap_or(&actor.display_name),
                title => task.title(),
                column => task.status().label()
            })?),
            None => None,
        };

        self.tasks.update(&task).await?;
        if let (Some(from), Some(message)) = (previous, moved) {
            info!(task_id = %task_id, from = %from, to = %task.status(), "moved task");
            self.log_activity(task.project_id(), actor.id, message).await?;
        } else {
            debug!(task_id = %task_id, "updated task");
        }
        Ok(Some(task))
    }

    /// Deletes a task, returning it when it existed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Option<Task>> {
        let removed = self.tasks.remove(task_id).await?;
        if removed.is_some() {
            info!(task_id = %task_id, actor = %actor.id, "deleted task");
        }
        Ok(removed)
    }

    /// Accepts a pending task onto the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when persistence or activity logging
    /// fails. Precondition failures are reported through the outcome.
    pub async fn accept_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let outcome = self
            .transition(task_id, |task, at| task.accept(at))
            .await?;
        if let TransitionOutcome::Applied(task) = &outcome {
            let message =
                MessageTemplate::TaskAccepted.render(context! { title => task.title() })?;
            self.log_activity(task.project_id(), actor.id, message).await?;
            info!(task_id = %task_id, actor = %actor.id, "accepted task");
        }
        Ok(outcome)
    }

    /// Rejects a pending task.
    ///
    /// A blank `reason` is replaced by [`DEFAULT_REJECTION_REASON`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when persistence or activity logging
    /// fails. Precondition failures are reported through the outcome.
    pub async fn reject_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        reason: &str,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let stated = match reason.trim() {
            "" => DEFAULT_REJECTION_REASON,
            trimmed => trimmed,
        };
        let rejected_by = actor.id;
        let outcome = self
            .transition(task_id, |task, at| task.reject(rejected_by, stated, at))
            .await?;
        if let TransitionOutcome::Applied(task) = &outcome {
            let message = MessageTemplate::TaskRejected.render(context! {
                title => task.title(),
                reason => stated
            })?;
            self.log_activity(task.project_id(), actor.id, message).await?;
            info!(task_id = %task_id, actor = %actor.id, reason = stated, "rejected task");
        }
        Ok(outcome)
    }

    /// Flags a rejected task as acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    /// Precondition failures are reported through the outcome.
    pub async fn acknowledge_rejected_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let outcome = self
            .transition(task_id, |task, at| task.acknowledge(at))
            .await?;
        if outcome.is_applied() {
            info!(task_id = %task_id, actor = %actor.id, "acknowledged rejected task");
        }
        Ok(outcome)
    }

    async fn transition(
        &self,
        task_id: TaskId,
        change: impl FnOnce(&mut Task, DateTime<Utc>) -> Result<(), TaskDomainError> + Send,
    ) -> TaskLifecycleResult<TransitionOutcome> {
        let Some(mut task) = self.tasks.find_by_id(task_id).await? else {
            warn!(task_id = %task_id, "transition refused; task not found");
            return Ok(TransitionOutcome::NotFound);
        };

        match change(&mut task, self.clock.utc()) {
            Ok(()) => {}
            Err(TaskDomainError::InvalidState { action, current }) => {
                warn!(task_id = %task_id, action, current = %current, "transition refused");
                return Ok(TransitionOutcome::InvalidState { current });
            }
            Err(other) => return Err(other.into()),
        }

        self.tasks.update(&task).await?;
        Ok(TransitionOutcome::Applied(task))
    }

    async fn log_activity(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        message: String,
    ) -> TaskLifecycleResult<()> {
        let recorded = self
            .activity
            .record(project_id, NewActivity::new(user_id, message))
            .await?;
        if recorded.is_none() {
            debug!(project_id = %project_id, "activity dropped; project not found");
        }
        Ok(())
    }
}
