//! Task aggregate root and its transitions.

use super::{Difficulty, Priority, TaskDomainError, TaskId, TaskStatus};
use crate::{identity::domain::UserId, project::domain::ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameter object for a task whose assignee and initial status have
/// already been decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Assigned user.
    pub assignee_id: UserId,
    /// Priority.
    pub priority: Priority,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Initial status.
    pub status: TaskStatus,
    /// Creating user.
    pub created_by: UserId,
}

/// Partial update merged into a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement assignee.
    pub assignee_id: Option<UserId>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement difficulty.
    pub difficulty: Option<Difficulty>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Creates an update that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Record of an assignee declining a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// User who rejected the task.
    pub rejected_by: UserId,
    /// When it was rejected.
    pub rejected_at: DateTime<Utc>,
    /// Stated reason.
    pub reason: String,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: String,
    assignee_id: UserId,
    priority: Priority,
    difficulty: Difficulty,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    created_by: UserId,
    #[serde(default)]
    accepted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    rejection: Option<Rejection>,
    #[serde(default)]
    acknowledged: bool,
    #[serde(default)]
    acknowledged_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task stamped at `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(data: NewTask, created_at: DateTime<Utc>) -> Result<Self, TaskDomainError> {
        if data.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            assignee_id: data.assignee_id,
            priority: data.priority,
            difficulty: data.difficulty,
            status: data.status,
            created_at,
            created_by: data.created_by,
            accepted_at: None,
            rejection: None,
            acknowledged: false,
            acknowledged_at: None,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns when the assignee accepted the task.
    #[must_use]
    pub const fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
    }

    /// Returns the rejection record, if the task was rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Returns `true` once an admin has acknowledged the rejection.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Returns when the rejection was acknowledged.
    #[must_use]
    pub const fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.acknowledged_at
    }

    /// Returns `true` for a rejected task nobody has acknowledged yet.
    #[must_use]
    pub fn awaits_acknowledgement(&self) -> bool {
        self.status == TaskStatus::Rejected && !self.acknowledged
    }

    /// Moves a pending task onto the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is pending.
    pub fn accept(&mut self, at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        self.require(TaskStatus::Pending, "accept")?;
        self.status = TaskStatus::Todo;
        self.accepted_at = Some(at);
        Ok(())
    }

    /// Declines a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is pending.
    pub fn reject(
        &mut self,
        rejected_by: UserId,
        reason: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TaskDomainError> {
        self.require(TaskStatus::Pending, "reject")?;
        self.status = TaskStatus::Rejected;
        self.rejection = Some(Rejection {
            rejected_by,
            rejected_at: at,
            reason: reason.into(),
        });
        self.acknowledged = false;
        self.acknowledged_at = None;
        Ok(())
    }

    /// Flags a rejection as seen.
    ///
    /// Acknowledging twice refreshes the timestamp. The rejection record is
    /// left untouched, and stays absent for a task moved to `rejected`
    /// through a free-form update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is rejected.
    pub fn acknowledge(&mut self, at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        self.require(TaskStatus::Rejected, "acknowledge")?;
        self.acknowledged = true;
        self.acknowledged_at = Some(at);
        Ok(())
    }

    /// Merges a partial update, returning the previous status when the
    /// status changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the replacement title is
    /// blank; the task is left unchanged in that case.
    pub fn apply(&mut self, update: TaskUpdate) -> Result<Option<TaskStatus>, TaskDomainError> {
        if update
            .title
            .as_ref()
            .is_some_and(|title| title.trim().is_empty())
        {
            return Err(TaskDomainError::EmptyTitle);
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(assignee_id) = update.assignee_id {
            self.assignee_id = assignee_id;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(difficulty) = update.difficulty {
            self.difficulty = difficulty;
        }

        let previous = self.status;
        match update.status {
            Some(status) if status != previous => {
                self.status = status;
                Ok(Some(previous))
            }
            _ => Ok(None),
        }
    }

    fn require(&self, expected: TaskStatus, action: &'static str) -> Result<(), TaskDomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidState {
                action,
                current: self.status,
            })
        }
    }
}
