//! The application-state container.
//!
//! A [`Workspace`] owns the four stores, wires the task engine to the
//! project store's activity log and the mailbox's notification sink, and
//! runs the cross-store flows a client performs on behalf of the session
//! user. State is imported from and exported to a [`WorkspaceSnapshot`];
//! [`SnapshotStore`] keeps snapshots on disk.

mod config;
mod error;
mod flows;
mod snapshot;
mod task_flows;
mod views;

pub use config::{
    ConfigError, DATA_DIR_ENV, DEFAULT_DATA_DIR, SEED_ADMIN_ENV, WorkspaceConfig,
};
pub use error::{WorkspaceError, WorkspaceResult};
pub use snapshot::{SnapshotError, SnapshotStore, WorkspaceSnapshot};
pub use views::{DashboardSummary, KanbanBoard};

use crate::{
    identity::{
        adapters::memory::{InMemorySessionStore, InMemoryUserRepository},
        domain::{EmailAddress, GlobalRole, User, UserProfile},
        services::IdentityService,
    },
    notification::{adapters::memory::InMemoryNotificationRepository, services::NotificationService},
    project::{
        adapters::memory::{InMemoryInvitationRepository, InMemoryProjectRepository},
        services::ProjectService,
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Identity service over the in-memory stores.
pub type WorkspaceIdentity<C> = IdentityService<InMemoryUserRepository, InMemorySessionStore, C>;
/// Project service over the in-memory stores.
pub type WorkspaceProjects<C> =
    ProjectService<InMemoryProjectRepository, InMemoryInvitationRepository, C>;
/// Notification service over the in-memory store.
pub type WorkspaceNotifications<C> = NotificationService<InMemoryNotificationRepository, C>;
/// Task engine wired to the workspace's project and notification services.
pub type WorkspaceTasks<C> = TaskLifecycleService<
    InMemoryTaskRepository,
    WorkspaceProjects<C>,
    WorkspaceNotifications<C>,
    C,
>;

/// First name of the seeded administrator.
pub const DEFAULT_ADMIN_FIRST_NAME: &str = "Admin";
/// Last name of the seeded administrator.
pub const DEFAULT_ADMIN_LAST_NAME: &str = "User";
/// Email of the seeded administrator.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@novatra.com";
/// Password of the seeded administrator.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Top-level container holding the four stores.
pub struct Workspace<C>
where
    C: Clock + Send + Sync + 'static,
{
    identity: WorkspaceIdentity<C>,
    projects: Arc<WorkspaceProjects<C>>,
    notifications: Arc<WorkspaceNotifications<C>>,
    tasks: WorkspaceTasks<C>,
}

impl<C> Workspace<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates an empty workspace with nobody logged in.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self::assemble(
            InMemoryUserRepository::new(),
            InMemorySessionStore::new(),
            WorkspaceSnapshot::default(),
            clock,
        )
    }

    /// Imports a snapshot, restoring its session.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] when the session cannot be
    /// restored.
    pub async fn from_snapshot(snapshot: WorkspaceSnapshot, clock: Arc<C>) -> WorkspaceResult<Self> {
        let users = InMemoryUserRepository::with_users(snapshot.users.iter().cloned());
        let session = snapshot.session;
        let workspace = Self::assemble(users, InMemorySessionStore::loading(), snapshot, clock);
        workspace.identity.restore_session(session).await?;
        Ok(workspace)
    }

    /// Loads the snapshot in the configured directory, seeding the default
    /// administrator into a workspace without users when configured to.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Snapshot`] when stored files cannot be read.
    pub async fn open(config: &WorkspaceConfig, clock: Arc<C>) -> WorkspaceResult<Self> {
        let mut snapshot = SnapshotStore::new(config.data_dir.clone()).load()?;
        if snapshot.users.is_empty() && config.seed_admin {
            let admin = default_admin()?;
            info!(user_id = %admin.id(), "seeded default administrator");
            snapshot.users.push(admin);
        }
        Self::from_snapshot(snapshot, clock).await
    }

    /// Exports the full logical state.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when a store cannot be read.
    pub async fn snapshot(&self) -> WorkspaceResult<WorkspaceSnapshot> {
        let session = self.identity.session_state().await?.session().copied();
        Ok(WorkspaceSnapshot {
            users: self.identity.list_users().await?,
            session,
            projects: self.projects.list_projects().await?,
            invitations: self.projects.list_invitations().await?,
            notifications: self.notifications.list_all().await?,
            tasks: self.tasks.list_all().await?,
        })
    }

    /// Writes the full logical state to `store`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError`] when a store cannot be read or the files
    /// cannot be written.
    pub async fn save(&self, store: &SnapshotStore) -> WorkspaceResult<()> {
        let snapshot = self.snapshot().await?;
        store.save(&snapshot)?;
        Ok(())
    }

    /// Returns the identity service.
    #[must_use]
    pub const fn identity(&self) -> &WorkspaceIdentity<C> {
        &self.identity
    }

    /// Returns the project service.
    #[must_use]
    pub fn projects(&self) -> &WorkspaceProjects<C> {
        &self.projects
    }

    /// Returns the notification service.
    #[must_use]
    pub fn notifications(&self) -> &WorkspaceNotifications<C> {
        &self.notifications
    }

    /// Returns the task engine.
    #[must_use]
    pub const fn tasks(&self) -> &WorkspaceTasks<C> {
        &self.tasks
    }

    fn assemble(
        users: InMemoryUserRepository,
        sessions: InMemorySessionStore,
        snapshot: WorkspaceSnapshot,
        clock: Arc<C>,
    ) -> Self {
        let identity = IdentityService::new(Arc::new(users), Arc::new(sessions), Arc::clone(&clock));
        let projects = Arc::new(ProjectService::new(
            Arc::new(InMemoryProjectRepository::with_projects(snapshot.projects)),
            Arc::new(InMemoryInvitationRepository::with_invitations(
                snapshot.invitations,
            )),
            Arc::clone(&clock),
        ));
        let notifications = Arc::new(NotificationService::new(
            Arc::new(InMemoryNotificationRepository::with_notifications(
                snapshot.notifications,
            )),
            Arc::clone(&clock),
        ));
        let tasks = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::with_tasks(snapshot.tasks)),
            Arc::clone(&projects),
            Arc::clone(&notifications),
            clock,
        );
        Self {
            identity,
            projects,
            notifications,
            tasks,
        }
    }
}

fn default_admin() -> WorkspaceResult<User> {
    let admin = User::new(
        UserProfile {
            first_name: DEFAULT_ADMIN_FIRST_NAME.to_owned(),
            last_name: DEFAULT_ADMIN_LAST_NAME.to_owned(),
            email: EmailAddress::new(DEFAULT_ADMIN_EMAIL)?,
            password: DEFAULT_ADMIN_PASSWORD.to_owned(),
        },
        GlobalRole::Admin,
    )?;
    Ok(admin)
}

#[cfg(test)]
mod tests;
