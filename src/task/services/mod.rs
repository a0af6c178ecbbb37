//! Application services for the task lifecycle.

mod lifecycle;
mod queries;

pub use lifecycle::{
    CreateTaskRequest, DEFAULT_REJECTION_REASON, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TransitionOutcome,
};
