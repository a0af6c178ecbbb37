//! Notification entity and its payloads.

use super::{NotificationId, ParseNotificationKindError};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task awaits the recipient's accept or reject decision.
    TaskAssigned,
    /// The recipient was invited to a project.
    ProjectInvitation,
    /// The recipient was added to a project directly.
    MemberAdded,
    /// Informational, nothing to act on.
    Info,
    /// Something the recipient should know went wrong or was refused.
    Error,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::ProjectInvitation => "project_invitation",
            Self::MemberAdded => "member_added",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, ParseNotificationKindError> {
        match value.trim() {
            "task_assigned" => Ok(Self::TaskAssigned),
            "project_invitation" => Ok(Self::ProjectInvitation),
            "member_added" => Ok(Self::MemberAdded),
            "info" => Ok(Self::Info),
            "error" => Ok(Self::Error),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// Structured reference carried by actionable notifications.
///
/// Identifiers are kept as raw UUIDs so the mailbox does not depend on the
/// contexts that own the referenced records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    /// Refers to a task.
    Task {
        /// Referenced task.
        task_id: Uuid,
    },
    /// Refers to a project invitation.
    Invitation {
        /// Referenced invitation.
        invitation_id: Uuid,
    },
}

/// Notification to be stamped and delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Human-readable message.
    pub message: String,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Optional structured reference.
    pub payload: Option<NotificationPayload>,
}

impl NewNotification {
    /// Creates a notification without a payload.
    #[must_use]
    pub fn new(user_id: UserId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            user_id,
            message: message.into(),
            kind,
            payload: None,
        }
    }

    /// Attaches a structured payload.
    #[must_use]
    pub const fn with_payload(mut self, payload: NotificationPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Stamps the notification as unread at `timestamp`.
    #[must_use]
    pub fn into_notification(self, timestamp: DateTime<Utc>) -> Notification {
        Notification {
            id: NotificationId::new(),
            user_id: self.user_id,
            message: self.message,
            kind: self.kind,
            payload: self.payload,
            timestamp,
            read: false,
        }
    }
}

/// Partial update merged into a notification.
///
/// `payload: Some(None)` clears the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationUpdate {
    /// Replacement message.
    pub message: Option<String>,
    /// Replacement kind.
    pub kind: Option<NotificationKind>,
    /// Replacement payload.
    pub payload: Option<Option<NotificationPayload>>,
    /// Replacement read flag.
    pub read: Option<bool>,
}

/// Message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    message: String,
    #[serde(rename = "type")]
    kind: NotificationKind,
    payload: Option<NotificationPayload>,
    timestamp: DateTime<Utc>,
    read: bool,
}

impl Notification {
    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the structured payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<NotificationPayload> {
        self.payload
    }

    /// Returns the delivery timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns `true` once the recipient has seen the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns `true` when this is the assignment notice for `task_id`.
    #[must_use]
    pub fn concerns_task(&self, task_id: Uuid) -> bool {
        self.kind == NotificationKind::TaskAssigned
            && self.payload == Some(NotificationPayload::Task { task_id })
    }

    /// Marks the notification as read.
    pub const fn mark_read(&mut self) {
        self.read = true;
    }

    /// Merges a partial update.
    pub fn apply(&mut self, update: NotificationUpdate) {
        if let Some(message) = update.message {
            self.message = message;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(payload) = update.payload {
            self.payload = payload;
        }
        if let Some(read) = update.read {
            self.read = read;
        }
    }

    /// Converts an actionable notification into a terminal one.
    pub fn resolve(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.apply(NotificationUpdate {
            message: Some(message.into()),
            kind: Some(kind),
            payload: Some(None),
            read: Some(true),
        });
    }
}
