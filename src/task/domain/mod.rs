//! Domain model for tasks and their lifecycle.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{Difficulty, KANBAN_COLUMNS, Priority, TaskStatus};
pub use task::{NewTask, Rejection, Task, TaskUpdate};
