//! [`NotificationSink`] backed by the notification service.

use super::NotificationService;
use crate::notification::{
    domain::{NewNotification, Notification},
    ports::{NotificationRepository, NotificationSink, NotificationSinkError, NotificationSinkResult},
};
use async_trait::async_trait;
use mockable::Clock;

#[async_trait]
impl<R, C> NotificationSink for NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    async fn notify(&self, notification: NewNotification) -> NotificationSinkResult<Notification> {
        self.create_notification(notification)
            .await
            .map_err(NotificationSinkError::new)
    }
}
