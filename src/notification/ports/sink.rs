//! Notification-emitting capability offered to other contexts.

use crate::notification::domain::{NewNotification, Notification};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification delivery.
pub type NotificationSinkResult<T> = Result<T, NotificationSinkError>;

/// Delivers notifications into a user's mailbox.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Stamps and delivers `notification`, returning the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationSinkError`] when delivery fails.
    async fn notify(&self, notification: NewNotification) -> NotificationSinkResult<Notification>;
}

/// Failure to deliver a notification.
#[derive(Debug, Clone, Error)]
#[error("notification delivery failure: {0}")]
pub struct NotificationSinkError(pub Arc<dyn std::error::Error + Send + Sync>);

impl NotificationSinkError {
    /// Wraps an underlying error.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
