//! Integration tests for the task engine wired to real neighbours.

use super::helpers::{Services, actor, services};
use novatra::{
    identity::domain::GlobalRole,
    notification::domain::{NotificationKind, NotificationPayload},
    project::{
        domain::{ActivityRecord, ProjectRole},
        services::CreateProjectRequest,
    },
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, TransitionOutcome},
    },
};
use rstest::rstest;

fn messages(feed: &[ActivityRecord]) -> Vec<&str> {
    feed.iter().map(|record| record.message.as_str()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_reaches_feed_and_mailbox(services: Services) -> Result<(), eyre::Report> {
    let admin = actor("Grace", GlobalRole::Admin);
    let member = actor("Linus", GlobalRole::User);
    let project = services
        .projects
        .create_project(&admin, CreateProjectRequest::new("Board"))
        .await?;
    services
        .projects
        .add_member(project.id(), member.id, admin.id, ProjectRole::User)
        .await?;

    let task = services
        .engine
        .create_task(
            &admin,
            CreateTaskRequest::new(project.id(), "Review").with_assignee(member.id),
        )
        .await?;

    eyre::ensure!(task.status() == TaskStatus::Pending, "assignment starts pending");
    let mailbox = services.mailbox.get_user_notifications(member.id).await?;
    let notice = mailbox
        .first()
        .ok_or_else(|| eyre::eyre!("assignee mailbox is empty"))?;
    eyre::ensure!(notice.kind() == NotificationKind::TaskAssigned, "wrong kind");
    eyre::ensure!(
        notice.message() == "Grace assigned you a new task: \"Review\"",
        "unexpected notice {:?}",
        notice.message()
    );
    eyre::ensure!(
        notice.payload()
            == Some(NotificationPayload::Task {
                task_id: task.id().into_inner()
            }),
        "notice does not point at the task"
    );
    let feed = services
        .projects
        .activity_feed(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(
        messages(&feed).first() == Some(&"Task \"Review\" was created"),
        "unexpected feed {:?}",
        messages(&feed)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejections_wait_for_acknowledgement(services: Services) -> Result<(), eyre::Report> {
    let admin = actor("Grace", GlobalRole::Admin);
    let member = actor("Linus", GlobalRole::User);
    let project = services
        .projects
        .create_project(&admin, CreateProjectRequest::new("Board"))
        .await?;
    let task = services
        .engine
        .create_task(
            &admin,
            CreateTaskRequest::new(project.id(), "Review").with_assignee(member.id),
        )
        .await?;
    eyre::ensure!(
        services.engine.get_project_pending_tasks(project.id()).await?.len() == 1,
        "pending task not listed"
    );

    let rejected = services
        .engine
        .reject_task(&member, task.id(), "on leave")
        .await?;
    eyre::ensure!(rejected.is_applied(), "rejection did not apply");
    let waiting = services
        .engine
        .get_unacknowledged_rejections(project.id())
        .await?;
    eyre::ensure!(waiting.len() == 1, "rejection not awaiting acknowledgement");

    let acknowledged = services
        .engine
        .acknowledge_rejected_task(&admin, task.id())
        .await?;
    let twice = services
        .engine
        .acknowledge_rejected_task(&admin, task.id())
        .await?;

    eyre::ensure!(acknowledged.is_applied(), "acknowledgement did not apply");
    eyre::ensure!(
        twice.is_applied(),
        "acknowledging again is idempotent on a rejected task"
    );
    eyre::ensure!(
        services
            .engine
            .get_unacknowledged_rejections(project.id())
            .await?
            .is_empty(),
        "acknowledged rejection still listed"
    );
    let feed = services
        .projects
        .activity_feed(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(
        messages(&feed).first() == Some(&"Task \"Review\" was rejected (Reason: on leave)"),
        "unexpected feed {:?}",
        messages(&feed)
    );
    let accept_after = services.engine.accept_task(&member, task.id()).await?;
    eyre::ensure!(
        accept_after
            == TransitionOutcome::InvalidState {
                current: TaskStatus::Rejected
            },
        "accepting a rejected task must be refused, got {accept_after:?}"
    );
    Ok(())
}
