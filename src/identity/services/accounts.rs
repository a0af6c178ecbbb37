//! Service layer for registration, login, and account lookup.

use crate::identity::{
    domain::{
        EmailAddress, GlobalRole, IdentityDomainError, Session, SessionState, User, UserId,
        UserProfile, UserUpdate,
    },
    ports::{SessionStore, SessionStoreError, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    role: GlobalRole,
}

impl RegisterUserRequest {
    /// Creates a request with the mandatory profile fields and the `user`
    /// global role.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            role: GlobalRole::User,
        }
    }

    /// Sets the global role.
    #[must_use]
    pub const fn with_role(mut self, role: GlobalRole) -> Self {
        self.role = role;
        self
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Registration attempted with an email that is already in use.
    #[error("this email address is already in use")]
    DuplicateEmail(EmailAddress),
    /// No user matches the email and password pair.
    #[error("email or password is incorrect")]
    InvalidCredentials,
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
    /// Session store operation failed.
    #[error(transparent)]
    Session(#[from] SessionStoreError),
}

/// Result type for identity service operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Account and session orchestration service.
#[derive(Clone)]
pub struct IdentityService<R, S, C>
where
    R: UserRepository,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    sessions: Arc<S>,
    clock: Arc<C>,
}

impl<R, S, C> IdentityService<R, S, C>
where
    R: UserRepository,
    S: SessionStore,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(users: Arc<R>, sessions: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            users,
            sessions,
            clock,
        }
    }

    /// Registers a new account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::DuplicateEmail`] when any stored user already
    /// has the email, [`IdentityError::Domain`] when the profile is invalid,
    /// [`IdentityError::Repository`] when persistence fails, or
    /// [`IdentityError::Session`] when the session cannot be started.
    pub async fn register(&self, request: RegisterUserRequest) -> IdentityResult<User> {
        let RegisterUserRequest {
            first_name,
            last_name,
            email,
            password,
            role,
        } = request;

        let address = EmailAddress::new(email)?;
        if self.users.find_by_email(&address).await?.is_some() {
            warn!(email = %address, "registration refused: email already in use");
            return Err(IdentityError::DuplicateEmail(address));
        }

        let user = User::new(
            UserProfile {
                first_name,
                last_name,
                email: address,
                password,
            },
            role,
        )?;
        self.users.store(&user).await?;
        self.start_session(user.id()).await?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Logs in the user whose email and password both match exactly.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] when no user matches;
    /// the session is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> IdentityResult<User> {
        let user = self
            .users
            .list_all()
            .await?
            .into_iter()
            .find(|user| user.email().as_str() == email && user.password_matches(password))
            .ok_or(IdentityError::InvalidCredentials)?;

        self.start_session(user.id()).await?;
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }

    /// Clears the session unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Session`] when the session slot fails.
    pub async fn logout(&self) -> IdentityResult<()> {
        self.sessions.replace(SessionState::Anonymous).await?;
        debug!("session cleared");
        Ok(())
    }

    /// Merges `update` into the user with `user_id`.
    ///
    /// The session refers to users by id, so the session user sees the
    /// change immediately. Returns `Ok(None)` when no such user exists.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Domain`] when a replacement name is blank or
    /// [`IdentityError::Repository`] when persistence fails.
    pub async fn update_user(
        &self,
        user_id: UserId,
        update: UserUpdate,
    ) -> IdentityResult<Option<User>> {
        let Some(mut user) = self.users.find_by_id(user_id).await? else {
            return Ok(None);
        };
        user.apply(update)?;
        self.users.update(&user).await?;
        debug!(user_id = %user_id, "updated user");
        Ok(Some(user))
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when lookup fails.
    pub async fn get_user_by_id(&self, user_id: UserId) -> IdentityResult<Option<User>> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Finds a user by exact email. Malformed addresses match nobody.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when lookup fails.
    pub async fn get_user_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        let Ok(address) = EmailAddress::new(email) else {
            return Ok(None);
        };
        Ok(self.users.find_by_email(&address).await?)
    }

    /// Provisions an account for an invited address without logging it in.
    ///
    /// Uniqueness is not re-checked; callers look the address up first.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when persistence fails.
    pub async fn create_user_from_email(
        &self,
        email: EmailAddress,
        role: GlobalRole,
    ) -> IdentityResult<User> {
        let user = User::provisioned(email, role);
        self.users.store(&user).await?;
        info!(user_id = %user.id(), email = %user.email(), "provisioned user from invitation");
        Ok(user)
    }

    /// Returns every account in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Repository`] when lookup fails.
    pub async fn list_users(&self) -> IdentityResult<Vec<User>> {
        Ok(self.users.list_all().await?)
    }

    /// Returns the raw session state.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Session`] when the session slot fails.
    pub async fn session_state(&self) -> IdentityResult<SessionState> {
        Ok(self.sessions.state().await?)
    }

    /// Returns `true` until stored session state has been restored.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Session`] when the session slot fails.
    pub async fn is_loading(&self) -> IdentityResult<bool> {
        Ok(self.sessions.state().await?.is_loading())
    }

    /// Returns the logged-in user, if any.
    ///
    /// A session whose user no longer resolves reads as logged out.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Session`] when the session slot fails and
    /// [`IdentityError::Repository`] when lookup fails.
    pub async fn current_user(&self) -> IdentityResult<Option<User>> {
        let state = self.sessions.state().await?;
        match state.session() {
            Some(session) => Ok(self.users.find_by_id(session.user_id).await?),
            None => Ok(None),
        }
    }

    /// Ends the loading phase with a previously persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Session`] when the session slot fails.
    pub async fn restore_session(&self, session: Option<Session>) -> IdentityResult<()> {
        let state = session.map_or(SessionState::Anonymous, SessionState::Authenticated);
        self.sessions.replace(state).await?;
        Ok(())
    }

    async fn start_session(&self, user_id: UserId) -> IdentityResult<()> {
        let session = Session {
            user_id,
            started_at: self.clock.utc(),
        };
        self.sessions
            .replace(SessionState::Authenticated(session))
            .await?;
        Ok(())
    }
}
