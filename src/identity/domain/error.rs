//! Error types for identity domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// A first or last name is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyName(&'static str),

    /// The email address does not have the `local@domain.tld` shape.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
}

/// Error returned while parsing a global role from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown global role: {0}")]
pub struct ParseGlobalRoleError(pub String);
