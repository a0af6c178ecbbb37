//! Port contracts for notification storage and delivery.

pub mod repository;
pub mod sink;

pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
pub use sink::{NotificationSink, NotificationSinkError, NotificationSinkResult};
