//! Project aggregate root.

use super::{ActivityRecord, ProjectDomainError, ProjectId, ProjectRole};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of adding a member to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    /// The user was inserted with the requested role.
    Added,
    /// The user was already a member; their role was left as it was.
    AlreadyMember(ProjectRole),
    /// No project has the given identifier.
    ProjectNotFound,
}

/// Partial update merged into a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Project aggregate root.
///
/// Membership is presence in `members`; keys are unique by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
    members: IndexMap<UserId, ProjectRole>,
    activity: Vec<ActivityRecord>,
}

impl Project {
    /// Creates a project whose creator is its first admin.
    ///
    /// `seed` becomes the first entry of the activity feed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        creator: UserId,
        seed: ActivityRecord,
    ) -> Result<Self, ProjectDomainError> {
        let raw_name = name.into();
        if raw_name.trim().is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }

        let mut members = IndexMap::new();
        members.insert(creator, ProjectRole::Admin);
        Ok(Self {
            id: ProjectId::new(),
            name: raw_name,
            description: description.into(),
            created_at: seed.timestamp,
            members,
            activity: vec![seed],
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns members and their roles in the order they joined.
    #[must_use]
    pub const fn members(&self) -> &IndexMap<UserId, ProjectRole> {
        &self.members
    }

    /// Returns the activity feed in chronological order.
    #[must_use]
    pub fn activity(&self) -> &[ActivityRecord] {
        &self.activity
    }

    /// Returns the role of `user_id`, or `None` when they are not a member.
    #[must_use]
    pub fn role_of(&self, user_id: UserId) -> Option<ProjectRole> {
        self.members.get(&user_id).copied()
    }

    /// Returns `true` when `user_id` is a member.
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.members.contains_key(&user_id)
    }

    /// Inserts a member unless already present.
    ///
    /// An existing member keeps their current role.
    pub fn add_member(&mut self, user_id: UserId, role: ProjectRole) -> MembershipChange {
        if let Some(existing) = self.role_of(user_id) {
            return MembershipChange::AlreadyMember(existing);
        }
        self.members.insert(user_id, role);
        MembershipChange::Added
    }

    /// Removes a member, returning the role they held.
    ///
    /// Nothing prevents removing the last admin.
    pub fn remove_member(&mut self, user_id: UserId) -> Option<ProjectRole> {
        self.members.shift_remove(&user_id)
    }

    /// Appends a record to the activity feed.
    pub fn record_activity(&mut self, record: ActivityRecord) {
        self.activity.push(record);
    }

    /// Merges name and description changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when the replacement name is
    /// blank; the project is left unchanged in that case.
    pub fn apply(&mut self, update: ProjectUpdate) -> Result<(), ProjectDomainError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(ProjectDomainError::EmptyName);
            }
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        Ok(())
    }
}
