//! Shared world state for task assignment BDD scenarios.

use std::sync::Arc;

use novatra::{
    project::domain::Project,
    task::domain::{Task, TaskId},
    workspace::{Workspace, WorkspaceResult},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Password shared by every scenario account.
pub const PASSWORD: &str = "secret";

/// Workspace type used by the BDD world.
pub type TestWorkspace = Workspace<DefaultClock>;

/// Scenario world for task assignment behaviour tests.
pub struct AssignmentWorld {
    pub workspace: TestWorkspace,
    pub admin_email: Option<String>,
    pub member_email: Option<String>,
    pub project: Option<Project>,
    pub task: Option<Task>,
    pub last_move: Option<WorkspaceResult<Task>>,
}

impl AssignmentWorld {
    /// Creates a world around an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workspace: Workspace::new(Arc::new(DefaultClock)),
            admin_email: None,
            member_email: None,
            project: None,
            task: None,
            last_move: None,
        }
    }

    /// Logs in as the scenario administrator.
    ///
    /// # Errors
    ///
    /// Returns an error when no administrator was set up or login fails.
    pub fn sign_in_as_admin(&self) -> Result<(), eyre::Report> {
        let email = self
            .admin_email
            .as_deref()
            .ok_or_else(|| eyre::eyre!("missing administrator in scenario world"))?;
        run_async(self.workspace.login(email, PASSWORD))?;
        Ok(())
    }

    /// Logs in as the scenario member.
    ///
    /// # Errors
    ///
    /// Returns an error when no member was set up or login fails.
    pub fn sign_in_as_member(&self) -> Result<(), eyre::Report> {
        let email = self
            .member_email
            .as_deref()
            .ok_or_else(|| eyre::eyre!("missing member in scenario world"))?;
        run_async(self.workspace.login(email, PASSWORD))?;
        Ok(())
    }

    /// Returns the current project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project was created.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns the identifier of the current task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .as_ref()
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for AssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AssignmentWorld {
    AssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
