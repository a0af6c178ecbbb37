//! Application services for the notification mailbox.

mod mailbox;
mod sink;

pub use mailbox::{NotificationResult, NotificationService, NotificationServiceError};
