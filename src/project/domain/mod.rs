//! Domain model for projects, membership, invitations, and activity.

mod activity;
mod error;
mod ids;
mod invitation;
mod project;
mod role;

pub use activity::{ActivityRecord, NewActivity};
pub use error::{ParseInvitationResponseError, ParseProjectRoleError, ProjectDomainError};
pub use ids::{ActivityId, InvitationId, ProjectId};
pub use invitation::{Invitation, InvitationResponse, InvitationStatus};
pub use project::{MembershipChange, Project, ProjectUpdate};
pub use role::ProjectRole;
