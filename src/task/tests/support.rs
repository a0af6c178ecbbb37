//! Shared fixtures wiring the engine to real project and notification
//! services.

use std::sync::Arc;

use crate::{
    identity::domain::{Actor, GlobalRole, UserId},
    notification::{adapters::memory::InMemoryNotificationRepository, services::NotificationService},
    project::{
        adapters::memory::{InMemoryInvitationRepository, InMemoryProjectRepository},
        domain::{ProjectId, ProjectRole},
        services::{CreateProjectRequest, ProjectService},
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) type Projects =
    ProjectService<InMemoryProjectRepository, InMemoryInvitationRepository, DefaultClock>;
pub(super) type Notifications = NotificationService<InMemoryNotificationRepository, DefaultClock>;
pub(super) type Engine =
    TaskLifecycleService<InMemoryTaskRepository, Projects, Notifications, DefaultClock>;

pub(super) struct Harness {
    pub(super) projects: Arc<Projects>,
    pub(super) notifications: Arc<Notifications>,
    pub(super) engine: Engine,
    pub(super) admin: Actor,
    pub(super) member: Actor,
}

pub(super) fn actor(first_name: &str, role: GlobalRole) -> Actor {
    Actor {
        id: UserId::new(),
        role,
        first_name: first_name.to_owned(),
        display_name: format!("{first_name} Tester"),
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    let clock = Arc::new(DefaultClock);
    let projects = Arc::new(ProjectService::new(
        Arc::new(InMemoryProjectRepository::new()),
        Arc::new(InMemoryInvitationRepository::new()),
        Arc::clone(&clock),
    ));
    let notifications = Arc::new(NotificationService::new(
        Arc::new(InMemoryNotificationRepository::new()),
        Arc::clone(&clock),
    ));
    let engine = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&projects),
        Arc::clone(&notifications),
        clock,
    );
    Harness {
        projects,
        notifications,
        engine,
        admin: actor("Grace", GlobalRole::Admin),
        member: actor("Linus", GlobalRole::User),
    }
}

impl Harness {
    /// Creates a project owned by the admin with the member as a `user`.
    pub(super) async fn project(&self) -> ProjectId {
        let project = self
            .projects
            .create_project(&self.admin, CreateProjectRequest::new("Board"))
            .await
            .expect("project creation");
        self.projects
            .add_member(project.id(), self.member.id, self.admin.id, ProjectRole::User)
            .await
            .expect("add member");
        project.id()
    }

    /// Returns the project's activity messages in chronological order.
    pub(super) async fn activity_messages(&self, project_id: ProjectId) -> Vec<String> {
        let project = self
            .projects
            .get_project_by_id(project_id)
            .await
            .expect("project lookup")
            .expect("project exists");
        project
            .activity()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }
}
