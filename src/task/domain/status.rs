//! Task status, priority, and difficulty.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// An acknowledged rejection is still [`TaskStatus::Rejected`]; the flag
/// lives on the task's rejection record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Assigned by an admin and awaiting the assignee's answer.
    Pending,
    /// Accepted onto the board, not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
    /// Declined by the assignee.
    Rejected,
}

/// The three board columns, in display order.
pub const KANBAN_COLUMNS: [TaskStatus; 3] =
    [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the column label shown on the board.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::Rejected => "Rejected",
        }
    }

    /// Returns `true` for the statuses shown as board columns.
    #[must_use]
    pub const fn is_kanban(self) -> bool {
        matches!(self, Self::Todo | Self::InProgress | Self::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Estimated task difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    #[default]
    Medium,
    /// Hard.
    Hard,
}
