//! Project invitations.

use super::{InvitationId, ParseInvitationResponseError, ProjectId, ProjectRole};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invitation status.
///
/// Invitations are removed on response rather than transitioned, so every
/// stored invitation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Awaiting the invitee's response.
    #[default]
    Pending,
}

/// The invitee's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationResponse {
    /// Join the project with the invited role.
    Accepted,
    /// Decline the invitation.
    Rejected,
}

impl TryFrom<&str> for InvitationResponse {
    type Error = ParseInvitationResponseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseInvitationResponseError(value.to_owned())),
        }
    }
}

/// Pending invitation for a user to join a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Invitation identifier.
    pub id: InvitationId,
    /// Project the invitee would join.
    pub project_id: ProjectId,
    /// Invited user.
    pub user_id: UserId,
    /// User who sent the invitation.
    pub invited_by: UserId,
    /// Role granted on acceptance.
    pub role: ProjectRole,
    /// Invitation status.
    pub status: InvitationStatus,
    /// When the invitation was sent.
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates a pending invitation.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        invited_by: UserId,
        role: ProjectRole,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: InvitationId::new(),
            project_id,
            user_id,
            invited_by,
            role,
            status: InvitationStatus::Pending,
            created_at,
        }
    }
}
