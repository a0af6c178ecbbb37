//! User aggregate and the actor view the other contexts consume.

use super::{EmailAddress, IdentityDomainError, ParseGlobalRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account-wide role.
///
/// Authorization inside a project is governed by the project-scoped role;
/// the global role only decides whether task creation routes through the
/// pending assignment workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
    /// Administrator account.
    Admin,
    /// Regular account.
    #[default]
    User,
}

impl GlobalRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for GlobalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for GlobalRole {
    type Error = ParseGlobalRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseGlobalRoleError(value.to_owned())),
        }
    }
}

/// Registration payload for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Plain-text password.
    pub password: String,
}

/// Partial update merged into an existing user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement email.
    pub email: Option<EmailAddress>,
    /// Replacement password.
    pub password: Option<String>,
    /// Replacement global role.
    pub role: Option<GlobalRole>,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    password: String,
    role: GlobalRole,
    avatar_initials: String,
}

impl User {
    /// Creates a new account from a registration profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when either name is blank.
    pub fn new(profile: UserProfile, role: GlobalRole) -> Result<Self, IdentityDomainError> {
        let first_name = non_empty(profile.first_name, "first name")?;
        let last_name = non_empty(profile.last_name, "last name")?;
        let avatar_initials = initials(&first_name, &last_name);
        Ok(Self {
            id: UserId::new(),
            first_name,
            last_name,
            email: profile.email,
            password: profile.password,
            role,
            avatar_initials,
        })
    }

    /// Creates an account for an invited address that has never registered.
    ///
    /// The local part is split on `.`; the first two segments become the
    /// capitalised first and last name, falling back to `User` and `Guest`.
    /// The password is a random eight character placeholder.
    #[must_use]
    pub fn provisioned(email: EmailAddress, role: GlobalRole) -> Self {
        let mut segments = email.local_part().split('.');
        let first_name = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .map_or_else(|| "User".to_owned(), capitalise);
        let last_name = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .map_or_else(|| "Guest".to_owned(), capitalise);
        let password: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        let avatar_initials = initials(&first_name, &last_name);

        Self {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password,
            role,
            avatar_initials,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the global role.
    #[must_use]
    pub const fn role(&self) -> GlobalRole {
        self.role
    }

    /// Returns the uppercase initials shown in avatars.
    #[must_use]
    pub fn avatar_initials(&self) -> &str {
        &self.avatar_initials
    }

    /// Returns `true` when `password` matches exactly.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    /// Returns the actor view used to attribute actions.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
            first_name: self.first_name.clone(),
            display_name: self.full_name(),
        }
    }

    /// Merges a partial update. Initials are re-derived when a name changes.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when a replacement name is
    /// blank; the user is left unchanged in that case.
    pub fn apply(&mut self, update: UserUpdate) -> Result<(), IdentityDomainError> {
        let first_name = update
            .first_name
            .map(|name| non_empty(name, "first name"))
            .transpose()?;
        let last_name = update
            .last_name
            .map(|name| non_empty(name, "last name"))
            .transpose()?;

        let names_changed = first_name.is_some() || last_name.is_some();
        if let Some(name) = first_name {
            self.first_name = name;
        }
        if let Some(name) = last_name {
            self.last_name = name;
        }
        if names_changed {
            self.avatar_initials = initials(&self.first_name, &self.last_name);
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }
}

/// Who is performing an operation.
///
/// Services take the actor explicitly rather than reading ambient session
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Acting user.
    pub id: UserId,
    /// Acting user's global role.
    pub role: GlobalRole,
    /// Given name, used in notification text.
    pub first_name: String,
    /// Full name, used in activity text.
    pub display_name: String,
}

impl Actor {
    /// Returns `true` for accounts with the global `admin` role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, GlobalRole::Admin)
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, IdentityDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IdentityDomainError::EmptyName(field));
    }
    Ok(trimmed.to_owned())
}

fn capitalise(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}
