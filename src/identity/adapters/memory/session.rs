//! In-memory session slot.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::SessionState,
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};

/// Thread-safe in-memory session holder.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl InMemorySessionStore {
    /// Creates an anonymous session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session store that reports loading until state is restored.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Loading)),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn state(&self) -> SessionStoreResult<SessionState> {
        let state = self.state.read().map_err(|err| {
            SessionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(*state)
    }

    async fn replace(&self, state: SessionState) -> SessionStoreResult<()> {
        let mut slot = self.state.write().map_err(|err| {
            SessionStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *slot = state;
        Ok(())
    }
}
