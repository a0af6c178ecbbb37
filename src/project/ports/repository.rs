//! Repository port for project persistence and lookup.

use crate::project::domain::{InvitationId, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project and invitation repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project at the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Replaces an existing project in place.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Removes a project, returning it when it existed.
    async fn remove(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns every project in collection order.
    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project and invitation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// An invitation with the same identifier already exists.
    #[error("duplicate invitation identifier: {0}")]
    DuplicateInvitation(InvitationId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
