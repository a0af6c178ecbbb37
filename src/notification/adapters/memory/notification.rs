//! In-memory notification repository.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};

/// Thread-safe in-memory notification repository preserving delivery order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<IndexMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `notifications`.
    #[must_use]
    pub fn with_notifications(notifications: impl IntoIterator<Item = Notification>) -> Self {
        let indexed = notifications
            .into_iter()
            .map(|notification| (notification.id(), notification))
            .collect();
        Self {
            notifications: Arc::new(RwLock::new(indexed)),
        }
    }
}

fn poisoned(err: &impl ToString) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(|err| poisoned(&err))?;
        if notifications.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        notifications.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(|err| poisoned(&err))?;
        let slot = notifications
            .get_mut(&notification.id())
            .ok_or(NotificationRepositoryError::NotFound(notification.id()))?;
        *slot = notification.clone();
        Ok(())
    }

    async fn remove(&self, id: NotificationId) -> NotificationRepositoryResult<Option<Notification>> {
        let mut notifications = self.notifications.write().map_err(|err| poisoned(&err))?;
        Ok(notifications.shift_remove(&id))
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let notifications = self.notifications.read().map_err(|err| poisoned(&err))?;
        Ok(notifications.get(&id).cloned())
    }

    async fn list_all(&self) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(|err| poisoned(&err))?;
        Ok(notifications.values().cloned().collect())
    }
}
