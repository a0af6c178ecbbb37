//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use novatra::{
    identity::{
        domain::{Actor, GlobalRole, User, UserId},
        services::RegisterUserRequest,
    },
    notification::{adapters::memory::InMemoryNotificationRepository, services::NotificationService},
    project::{
        adapters::memory::{InMemoryInvitationRepository, InMemoryProjectRepository},
        services::ProjectService,
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
    workspace::Workspace,
};
use rstest::fixture;

/// Workspace type used by the integration tests.
pub type TestWorkspace = Workspace<DefaultClock>;

/// Project service over in-memory stores.
pub type Projects =
    ProjectService<InMemoryProjectRepository, InMemoryInvitationRepository, DefaultClock>;

/// Notification service over an in-memory store.
pub type Mailbox = NotificationService<InMemoryNotificationRepository, DefaultClock>;

/// Task engine wired to real project and notification services.
pub type Engine = TaskLifecycleService<InMemoryTaskRepository, Projects, Mailbox, DefaultClock>;

/// Password shared by every test account.
pub const PASSWORD: &str = "secret";

/// Provides an empty workspace with nobody logged in.
#[fixture]
pub fn workspace() -> TestWorkspace {
    Workspace::new(Arc::new(DefaultClock))
}

/// Services wired together the way a workspace wires them.
pub struct Services {
    pub projects: Arc<Projects>,
    pub mailbox: Arc<Mailbox>,
    pub engine: Engine,
}

/// Provides freshly wired services.
#[fixture]
pub fn services() -> Services {
    let clock = Arc::new(DefaultClock);
    let projects = Arc::new(ProjectService::new(
        Arc::new(InMemoryProjectRepository::new()),
        Arc::new(InMemoryInvitationRepository::new()),
        Arc::clone(&clock),
    ));
    let mailbox = Arc::new(NotificationService::new(
        Arc::new(InMemoryNotificationRepository::new()),
        Arc::clone(&clock),
    ));
    let engine = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&projects),
        Arc::clone(&mailbox),
        clock,
    );
    Services {
        projects,
        mailbox,
        engine,
    }
}

/// Registers `first_name` with a derived address; the new account is left
/// logged in.
///
/// # Errors
///
/// Returns an error if registration fails.
pub async fn register(
    workspace: &TestWorkspace,
    first_name: &str,
    role: GlobalRole,
) -> Result<User, eyre::Report> {
    let email = format!("{}@example.com", first_name.to_lowercase());
    let user = workspace
        .register(RegisterUserRequest::new(first_name, "Tester", email, PASSWORD).with_role(role))
        .await?;
    Ok(user)
}

/// Builds an actor without an account behind it.
#[must_use]
pub fn actor(first_name: &str, role: GlobalRole) -> Actor {
    Actor {
        id: UserId::new(),
        role,
        first_name: first_name.to_owned(),
        display_name: format!("{first_name} Tester"),
    }
}
