//! Application services for projects, membership, and invitations.

mod activity;
mod invitations;
mod projects;

pub use invitations::InvitationResolution;
pub use projects::{CreateProjectRequest, ProjectResult, ProjectService, ProjectServiceError};
