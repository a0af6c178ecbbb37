//! Port contracts for projects and invitations.
//!
//! Ports define infrastructure-agnostic interfaces used by project services,
//! plus the [`ActivityLog`] capability the project context offers others.

pub mod activity;
pub mod invitation;
pub mod repository;

pub use activity::{ActivityLog, ActivityLogError, ActivityLogResult};
pub use invitation::InvitationRepository;
pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
