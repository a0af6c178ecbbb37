//! Port for the process-wide session slot.

use crate::identity::domain::SessionState;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Holder of the single current session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current session state.
    async fn state(&self) -> SessionStoreResult<SessionState>;

    /// Replaces the current session state.
    async fn replace(&self, state: SessionState) -> SessionStoreResult<()>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// The session slot could not be read or written.
    #[error("session store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
