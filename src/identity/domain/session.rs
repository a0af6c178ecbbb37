//! Authenticated session state.

use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The currently authenticated user.
///
/// The session refers to the user by identifier, so profile updates made
/// to the session user are visible through it without a refresh step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier of the authenticated user.
    pub user_id: UserId,
    /// When the session began.
    pub started_at: DateTime<Utc>,
}

/// Process-wide session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Stored state has not been restored yet.
    Loading,
    /// Nobody is logged in.
    #[default]
    Anonymous,
    /// A user is logged in.
    Authenticated(Session),
}

impl SessionState {
    /// Returns the active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Loading | Self::Anonymous => None,
        }
    }

    /// Returns `true` while stored state is still being restored.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
