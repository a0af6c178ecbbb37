//! Activity feed records.

use super::ActivityId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pre-rendered audit entry attached to exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Record identifier.
    pub id: ActivityId,
    /// Acting user.
    pub user_id: UserId,
    /// Human-readable message.
    pub message: String,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
}

/// Activity to be stamped and appended to a project feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    /// Acting user.
    pub user_id: UserId,
    /// Human-readable message.
    pub message: String,
}

impl NewActivity {
    /// Creates an activity attributed to `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
        }
    }

    /// Stamps the activity with a fresh identifier and `timestamp`.
    #[must_use]
    pub fn into_record(self, timestamp: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord {
            id: ActivityId::new(),
            user_id: self.user_id,
            message: self.message,
            timestamp,
        }
    }
}
