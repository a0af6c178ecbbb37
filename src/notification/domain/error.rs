//! Error types for notification parsing.

use thiserror::Error;

/// Error returned while parsing a notification kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown notification kind: {0}")]
pub struct ParseNotificationKindError(pub String);
