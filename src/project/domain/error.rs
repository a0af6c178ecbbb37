//! Error types for project domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,
}

/// Error returned while parsing a project role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project role: {0}")]
pub struct ParseProjectRoleError(pub String);

/// Error returned while parsing an invitation response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown invitation response: {0}")]
pub struct ParseInvitationResponseError(pub String);
