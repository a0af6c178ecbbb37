//! In-memory project repository.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository preserving creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<IndexMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `projects`, keeping their
    /// order.
    #[must_use]
    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let indexed = projects
            .into_iter()
            .map(|project| (project.id(), project))
            .collect();
        Self {
            projects: Arc::new(RwLock::new(indexed)),
        }
    }
}

fn poisoned(err: &impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(|err| poisoned(&err))?;
        if projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.projects.write().map_err(|err| poisoned(&err))?;
        let slot = projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::ProjectNotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn remove(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let mut projects = self.projects.write().map_err(|err| poisoned(&err))?;
        Ok(projects.shift_remove(&id))
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.projects.read().map_err(|err| poisoned(&err))?;
        Ok(projects.get(&id).cloned())
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|err| poisoned(&err))?;
        Ok(projects.values().cloned().collect())
    }
}
