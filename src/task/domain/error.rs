//! Error types for task domain validation and parsing.

use super::TaskStatus;
use thiserror::Error;

/// Errors returned while constructing or transitioning tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The requested transition is not legal from the current status.
    #[error("cannot {action} a task in status {current}")]
    InvalidState {
        /// Attempted transition.
        action: &'static str,
        /// Status the task was in.
        current: TaskStatus,
    },
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
