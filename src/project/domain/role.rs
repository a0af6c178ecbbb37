//! Project-scoped roles.

use super::ParseProjectRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's authorization level inside one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Full project rights; sees every task.
    Admin,
    /// Limited rights; sees only tasks assigned to them.
    #[default]
    User,
}

impl ProjectRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectRole {
    type Error = ParseProjectRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(ParseProjectRoleError(value.to_owned())),
        }
    }
}
