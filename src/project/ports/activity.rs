//! Activity-logging capability offered to other contexts.

use crate::project::domain::{ActivityRecord, NewActivity, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity logging.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Appends records to a project's activity feed.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Stamps and appends `activity` to the feed of `project_id`.
    ///
    /// Returns `Ok(None)` when the project does not exist; nothing is
    /// recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError`] when the feed cannot be written.
    async fn record(
        &self,
        project_id: ProjectId,
        activity: NewActivity,
    ) -> ActivityLogResult<Option<ActivityRecord>>;
}

/// Failure to write an activity record.
#[derive(Debug, Clone, Error)]
#[error("activity log failure: {0}")]
pub struct ActivityLogError(pub Arc<dyn std::error::Error + Send + Sync>);

impl ActivityLogError {
    /// Wraps an underlying error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
