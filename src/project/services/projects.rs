//! Service layer for project creation, membership, and activity.

use crate::{
    identity::domain::{Actor, UserId},
    project::{
        domain::{
            ActivityRecord, MembershipChange, NewActivity, Project, ProjectDomainError, ProjectId,
            ProjectRole, ProjectUpdate,
        },
        ports::{InvitationRepository, ProjectRepository, ProjectRepositoryError},
    },
    templates::{MessageTemplate, TemplateError},
};
use minijinja::context;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Activity text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type for project service operations.
pub type ProjectResult<T> = Result<T, ProjectServiceError>;

/// Project, membership, invitation, and activity orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, I, C>
where
    P: ProjectRepository,
    I: InvitationRepository,
    C: Clock + Send + Sync,
{
    pub(super) projects: Arc<P>,
    pub(super) invitations: Arc<I>,
    pub(super) clock: Arc<C>,
}

impl<P, I, C> ProjectService<P, I, C>
where
    P: ProjectRepository,
    I: InvitationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, invitations: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            projects,
            invitations,
            clock,
        }
    }

    /// Creates a project with `creator` as its admin and a seed activity.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the name is blank, the seed text
    /// cannot be rendered, or persistence fails.
    pub async fn create_project(
        &self,
        creator: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectResult<Project> {
        let message =
            MessageTemplate::ProjectCreated.render(context! { actor => creator.display_name })?;
        let seed = NewActivity::new(creator.id, message).into_record(self.clock.utc());
        let project = Project::new(request.name, request.description, creator.id, seed)?;
        self.projects.store(&project).await?;
        info!(project_id = %project.id(), creator = %creator.id, "created project");
        Ok(project)
    }

    /// Merges name and description changes.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the new name is blank or
    /// persistence fails.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        update: ProjectUpdate,
    ) -> ProjectResult<Option<Project>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        project.apply(update)?;
        self.projects.update(&project).await?;
        debug!(project_id = %project_id, "updated project");
        Ok(Some(project))
    }

    /// Deletes a project, returning it when it existed.
    ///
    /// Tasks and invitations referring to the project are left in place.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn delete_project(&self, project_id: ProjectId) -> ProjectResult<Option<Project>> {
        let removed = self.projects.remove(project_id).await?;
        if removed.is_some() {
            info!(project_id = %project_id, "deleted project");
        }
        Ok(removed)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn get_project_by_id(&self, project_id: ProjectId) -> ProjectResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Returns every project in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_projects(&self) -> ProjectResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }

    /// Returns the projects `user_id` is a member of, in collection order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn get_user_projects(&self, user_id: UserId) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.list_all().await?;
        Ok(projects
            .into_iter()
            .filter(|project| project.is_member(user_id))
            .collect())
    }

    /// Adds `user_id` with `role`, logging the change as `added_by`.
    ///
    /// Adding an existing member is a no-op that keeps their current role.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the activity text cannot be
    /// rendered or persistence fails.
    pub async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        added_by: UserId,
        role: ProjectRole,
    ) -> ProjectResult<MembershipChange> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(MembershipChange::ProjectNotFound);
        };

        let change = project.add_member(user_id, role);
        if change == MembershipChange::Added {
            let message = MessageTemplate::MemberAdded.render(context! { role => role.as_str() })?;
            project.record_activity(NewActivity::new(added_by, message).into_record(self.clock.utc()));
            self.projects.update(&project).await?;
            info!(project_id = %project_id, user_id = %user_id, role = %role, "added project member");
        } else {
            debug!(project_id = %project_id, user_id = %user_id, "member already present; role kept");
        }
        Ok(change)
    }

    /// Removes `user_id` from the project without logging activity.
    ///
    /// Returns the removed role, or `Ok(None)` when the project is missing or
    /// the user was not a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectResult<Option<ProjectRole>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        let removed = project.remove_member(user_id);
        if removed.is_some() {
            self.projects.update(&project).await?;
            info!(project_id = %project_id, user_id = %user_id, "removed project member");
        }
        Ok(removed)
    }

    /// Returns the role of `user_id`, or `None` when the project is missing or
    /// the user is not a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn get_user_role_in_project(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectResult<Option<ProjectRole>> {
        let project = self.projects.find_by_id(project_id).await?;
        Ok(project.and_then(|found| found.role_of(user_id)))
    }

    /// Stamps and appends an activity record.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn add_activity(
        &self,
        project_id: ProjectId,
        activity: NewActivity,
    ) -> ProjectResult<Option<ActivityRecord>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        let record = activity.into_record(self.clock.utc());
        project.record_activity(record.clone());
        self.projects.update(&project).await?;
        debug!(project_id = %project_id, activity_id = %record.id, "recorded activity");
        Ok(Some(record))
    }

    /// Returns the activity feed newest-first.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn activity_feed(
        &self,
        project_id: ProjectId,
    ) -> ProjectResult<Option<Vec<ActivityRecord>>> {
        let project = self.projects.find_by_id(project_id).await?;
        Ok(project.map(|found| {
            let mut feed: Vec<ActivityRecord> = found.activity().iter().rev().cloned().collect();
            feed.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));
            feed
        }))
    }
}
