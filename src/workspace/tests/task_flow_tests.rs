//! Tests for task flows, the board, and the dashboard.

use super::{TestWorkspace, register, workspace};
use crate::{
    identity::{
        domain::{GlobalRole, User},
        services::RegisterUserRequest,
    },
    notification::domain::NotificationKind,
    project::{
        domain::{Project, ProjectRole},
        services::CreateProjectRequest,
    },
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, TransitionOutcome},
    },
    workspace::{DashboardSummary, WorkspaceError},
};
use rstest::rstest;

struct Team {
    grace: User,
    bob: User,
    project: Project,
}

/// Grace (global admin) owns a project Bob belongs to; Grace is logged in.
async fn team(workspace: &TestWorkspace) -> Team {
    let bob = register(workspace, "Bob", "bob@example.com").await;
    let grace = workspace
        .register(
            RegisterUserRequest::new("Grace", "Tester", "grace@example.com", "secret")
                .with_role(GlobalRole::Admin),
        )
        .await
        .expect("admin registration");
    let project = workspace
        .create_project(CreateProjectRequest::new("Board"))
        .await
        .expect("project creation");
    workspace
        .add_member_by_email(project.id(), "bob@example.com", ProjectRole::User)
        .await
        .expect("add bob");
    Team {
        grace,
        bob,
        project,
    }
}

async fn login(workspace: &TestWorkspace, email: &str) {
    workspace.login(email, "secret").await.expect("login");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_create_tasks(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    register(&workspace, "Eve", "eve@example.com").await;

    let result = workspace
        .create_task(CreateTaskRequest::new(team.project.id(), "Sneak in"))
        .await;

    assert!(matches!(result, Err(WorkspaceError::Forbidden { .. })));
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test(flavor = "multi_thread")]
async fn answering_an_assignment_resolves_its_notice(
    workspace: TestWorkspace,
    #[case] accept: bool,
) {
    let team = team(&workspace).await;
    let task = workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Write docs").with_assignee(team.bob.id()),
        )
        .await
        .expect("task creation");
    assert_eq!(task.status(), TaskStatus::Pending);
    login(&workspace, "bob@example.com").await;

    let outcome = if accept {
        workspace.accept_assigned_task(task.id()).await
    } else {
        workspace.reject_assigned_task(task.id(), "").await
    }
    .expect("answer");

    let answered = outcome.into_task().expect("transition applied");
    let notice = workspace
        .notifications()
        .find_by_task(task.id().into_inner())
        .await
        .expect("lookup");
    assert!(notice.is_none(), "resolved notices drop their payload");
    let mailbox = workspace.my_notifications().await.expect("mailbox");
    let resolved = mailbox
        .iter()
        .find(|entry| entry.message().contains("Write docs"))
        .expect("resolved notice");
    assert!(resolved.is_read());
    if accept {
        assert_eq!(answered.status(), TaskStatus::Todo);
        assert_eq!(resolved.kind(), NotificationKind::Info);
        assert_eq!(resolved.message(), "Task accepted: \"Write docs\"");
    } else {
        assert_eq!(answered.status(), TaskStatus::Rejected);
        assert_eq!(resolved.kind(), NotificationKind::Error);
        assert_eq!(resolved.message(), "Task rejected: \"Write docs\"");
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strangers_cannot_answer_assignments(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    let task = workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Write docs").with_assignee(team.bob.id()),
        )
        .await
        .expect("task creation");
    register(&workspace, "Eve", "eve@example.com").await;

    let result = workspace.accept_assigned_task(task.id()).await;

    assert!(matches!(result, Err(WorkspaceError::Forbidden { .. })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_project_admins_acknowledge_rejections(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    let task = workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Write docs").with_assignee(team.bob.id()),
        )
        .await
        .expect("task creation");
    login(&workspace, "bob@example.com").await;
    workspace
        .reject_assigned_task(task.id(), "too busy")
        .await
        .expect("reject");

    let refused = workspace.acknowledge_rejection(task.id()).await;
    assert!(matches!(refused, Err(WorkspaceError::Forbidden { .. })));

    login(&workspace, "grace@example.com").await;
    let outcome = workspace
        .acknowledge_rejection(task.id())
        .await
        .expect("acknowledge");
    let acknowledged = outcome.into_task().expect("transition applied");
    assert!(!acknowledged.awaits_acknowledgement());
    assert_eq!(
        acknowledged.rejection().map(|rejection| rejection.reason.as_str()),
        Some("too busy")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_move_only_their_own_tasks(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    let admins_task = workspace
        .create_task(CreateTaskRequest::new(team.project.id(), "Plan release"))
        .await
        .expect("admin task");
    login(&workspace, "bob@example.com").await;
    let own_task = workspace
        .create_task(CreateTaskRequest::new(team.project.id(), "Fix login"))
        .await
        .expect("member task");

    let refused = workspace
        .move_task(admins_task.id(), TaskStatus::Done)
        .await;
    let moved = workspace
        .move_task(own_task.id(), TaskStatus::InProgress)
        .await
        .expect("move own task");

    assert!(matches!(refused, Err(WorkspaceError::Forbidden { .. })));
    assert_eq!(moved.status(), TaskStatus::InProgress);
    let project = workspace
        .projects()
        .get_project_by_id(team.project.id())
        .await
        .expect("lookup")
        .expect("project");
    let last = project.activity().last().expect("activity");
    assert_eq!(last.message, "Bob Tester moved \"Fix login\" to In Progress");
    assert_eq!(last.user_id, team.bob.id());
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Rejected)]
#[tokio::test(flavor = "multi_thread")]
async fn moves_outside_the_board_are_refused(
    workspace: TestWorkspace,
    #[case] status: TaskStatus,
) {
    let team = team(&workspace).await;
    let task = workspace
        .create_task(CreateTaskRequest::new(team.project.id(), "Plan release"))
        .await
        .expect("task creation");

    let result = workspace.move_task(task.id(), status).await;

    assert!(matches!(result, Err(WorkspaceError::NotAColumn(refused)) if refused == status));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_and_dashboard_follow_membership(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Ship it").with_status(TaskStatus::Done),
        )
        .await
        .expect("admin task");
    workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Review").with_assignee(team.bob.id()),
        )
        .await
        .expect("pending task");
    login(&workspace, "bob@example.com").await;
    workspace
        .create_task(CreateTaskRequest::new(team.project.id(), "Fix login"))
        .await
        .expect("member task");

    let bobs_board = workspace
        .kanban_board(team.project.id())
        .await
        .expect("board");
    let summary = workspace.dashboard_summary().await.expect("dashboard");
    login(&workspace, "grace@example.com").await;
    let graces_board = workspace
        .kanban_board(team.project.id())
        .await
        .expect("board");

    assert_eq!(bobs_board.todo.len(), 1);
    assert!(bobs_board.done.is_empty());
    assert_eq!(graces_board.todo.len(), 1);
    assert_eq!(graces_board.done.len(), 1);
    assert!(
        graces_board
            .todo
            .iter()
            .chain(&graces_board.done)
            .all(|task| task.assignee_id() == team.grace.id() || task.title() == "Fix login")
    );
    assert_eq!(
        summary,
        DashboardSummary {
            total: 3,
            todo: 1,
            in_progress: 0,
            done: 1,
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_view_the_board(workspace: TestWorkspace) {
    let team = team(&workspace).await;
    workspace
        .create_task(
            CreateTaskRequest::new(team.project.id(), "Secret").with_status(TaskStatus::Done),
        )
        .await
        .expect("admin task");
    register(&workspace, "Mallory", "mallory@example.com").await;

    let board = workspace.kanban_board(team.project.id()).await;

    assert!(matches!(
        board,
        Err(WorkspaceError::Forbidden {
            action: "view this board"
        })
    ));
}
