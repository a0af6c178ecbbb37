//! Mailbox operations: delivery, read state, and terminal resolution.

use crate::{
    identity::domain::UserId,
    notification::{
        domain::{
            NewNotification, Notification, NotificationId, NotificationKind, NotificationUpdate,
        },
        ports::{NotificationRepository, NotificationRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
}

/// Result type for notification service operations.
pub type NotificationResult<T> = Result<T, NotificationServiceError>;

/// Notification mailbox service.
#[derive(Clone)]
pub struct NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    notifications: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(notifications: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            notifications,
            clock,
        }
    }

    /// Stamps and stores an unread notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn create_notification(
        &self,
        notification: NewNotification,
    ) -> NotificationResult<Notification> {
        let stored = notification.into_notification(self.clock.utc());
        self.notifications.store(&stored).await?;
        info!(
            notification_id = %stored.id(),
            user_id = %stored.user_id(),
            kind = %stored.kind(),
            "delivered notification"
        );
        Ok(stored)
    }

    /// Marks one notification as read.
    ///
    /// Returns `Ok(None)` when the notification does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn mark_as_read(
        &self,
        notification_id: NotificationId,
    ) -> NotificationResult<Option<Notification>> {
        self.modify(notification_id, Notification::mark_read).await
    }

    /// Marks every unread notification of `user_id` as read.
    ///
    /// Returns how many notifications changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn mark_all_as_read(&self, user_id: UserId) -> NotificationResult<usize> {
        let mut changed = 0;
        for mut notification in self.notifications.list_all().await? {
            if notification.user_id() != user_id || notification.is_read() {
                continue;
            }
            notification.mark_read();
            self.notifications.update(&notification).await?;
            changed += 1;
        }
        debug!(user_id = %user_id, changed, "marked notifications as read");
        Ok(changed)
    }

    /// Deletes a notification, returning it when it existed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn delete_notification(
        &self,
        notification_id: NotificationId,
    ) -> NotificationResult<Option<Notification>> {
        let removed = self.notifications.remove(notification_id).await?;
        if removed.is_some() {
            debug!(notification_id = %notification_id, "deleted notification");
        }
        Ok(removed)
    }

    /// Merges a partial update.
    ///
    /// Returns `Ok(None)` when the notification does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn update_notification(
        &self,
        notification_id: NotificationId,
        update: NotificationUpdate,
    ) -> NotificationResult<Option<Notification>> {
        self.modify(notification_id, |notification| notification.apply(update))
            .await
    }

    /// Converts an actionable notification into a terminal one: the message
    /// and kind are replaced, the payload is cleared and it is marked read.
    ///
    /// Returns `Ok(None)` when the notification does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when persistence
    /// fails.
    pub async fn resolve(
        &self,
        notification_id: NotificationId,
        message: impl Into<String> + Send,
        kind: NotificationKind,
    ) -> NotificationResult<Option<Notification>> {
        let text = message.into();
        self.modify(notification_id, |notification| {
            notification.resolve(text, kind);
        })
        .await
    }

    /// Returns the notifications addressed to `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn get_user_notifications(
        &self,
        user_id: UserId,
    ) -> NotificationResult<Vec<Notification>> {
        let mut mailbox: Vec<Notification> = self
            .notifications
            .list_all()
            .await?
            .into_iter()
            .rev()
            .filter(|notification| notification.user_id() == user_id)
            .collect();
        mailbox.sort_by(|left, right| right.timestamp().cmp(&left.timestamp()));
        Ok(mailbox)
    }

    /// Counts unread notifications addressed to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn get_unread_count(&self, user_id: UserId) -> NotificationResult<usize> {
        let notifications = self.notifications.list_all().await?;
        Ok(notifications
            .iter()
            .filter(|notification| notification.user_id() == user_id && !notification.is_read())
            .count())
    }

    /// Finds the assignment notice that still points at `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn find_by_task(&self, task_id: Uuid) -> NotificationResult<Option<Notification>> {
        let notifications = self.notifications.list_all().await?;
        Ok(notifications
            .into_iter()
            .find(|notification| notification.concerns_task(task_id)))
    }

    /// Finds a notification by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn get_notification(
        &self,
        notification_id: NotificationId,
    ) -> NotificationResult<Option<Notification>> {
        Ok(self.notifications.find_by_id(notification_id).await?)
    }

    /// Returns every notification in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> NotificationResult<Vec<Notification>> {
        Ok(self.notifications.list_all().await?)
    }

    async fn modify(
        &self,
        notification_id: NotificationId,
        change: impl FnOnce(&mut Notification) + Send,
    ) -> NotificationResult<Option<Notification>> {
        let Some(mut notification) = self.notifications.find_by_id(notification_id).await? else {
            return Ok(None);
        };
        change(&mut notification);
        self.notifications.update(&notification).await?;
        debug!(notification_id = %notification_id, read = notification.is_read(), "updated notification");
        Ok(Some(notification))
    }
}
