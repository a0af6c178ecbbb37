//! In-memory user repository.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<IndexMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`, keeping their order.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let indexed = users.into_iter().map(|user| (user.id(), user)).collect();
        Self {
            users: Arc::new(RwLock::new(indexed)),
        }
    }
}

fn poisoned(err: &impl ToString) -> UserRepositoryError {
    UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(|err| poisoned(&err))?;
        if users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }
        users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut users = self.users.write().map_err(|err| poisoned(&err))?;
        let slot = users
            .get_mut(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(|err| poisoned(&err))?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let users = self.users.read().map_err(|err| poisoned(&err))?;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let users = self.users.read().map_err(|err| poisoned(&err))?;
        Ok(users.values().cloned().collect())
    }
}
