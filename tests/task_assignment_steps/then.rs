//! Then steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use eyre::WrapErr;
use novatra::{
    notification::domain::{Notification, NotificationKind},
    task::domain::TaskStatus,
    workspace::WorkspaceError,
};
use rstest_bdd_macros::then;

fn member_mailbox(world: &AssignmentWorld) -> Result<Vec<Notification>, eyre::Report> {
    world.sign_in_as_member()?;
    run_async(world.workspace.my_notifications()).wrap_err("read member mailbox")
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &AssignmentWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let stored = run_async(world.workspace.tasks().get_task_by_id(world.task_id()?))
        .wrap_err("look up scenario task")?
        .ok_or_else(|| eyre::eyre!("scenario task disappeared"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        stored.status().as_str()
    );
    Ok(())
}

#[then(r#"the member has an unread "{kind}" notification"#)]
fn member_has_unread(world: &AssignmentWorld, kind: String) -> Result<(), eyre::Report> {
    let expected = NotificationKind::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid notification kind in scenario: {err}"))?;
    let mailbox = member_mailbox(world)?;
    eyre::ensure!(
        mailbox
            .iter()
            .any(|entry| entry.kind() == expected && !entry.is_read()),
        "no unread {kind} notification in {mailbox:?}"
    );
    Ok(())
}

#[then(r#"the member's notice is a read "{kind}" entry saying "{prefix}""#)]
fn member_notice_is_resolved(
    world: &AssignmentWorld,
    kind: String,
    prefix: String,
) -> Result<(), eyre::Report> {
    let expected = NotificationKind::try_from(kind.as_str())
        .map_err(|err| eyre::eyre!("invalid notification kind in scenario: {err}"))?;
    let title = world
        .task
        .as_ref()
        .map(|task| task.title().to_owned())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let mailbox = member_mailbox(world)?;
    let notice = mailbox
        .iter()
        .find(|entry| entry.message().starts_with(&prefix))
        .ok_or_else(|| eyre::eyre!("no notice starting {prefix:?} in {mailbox:?}"))?;
    eyre::ensure!(
        notice.message().contains(&title),
        "notice {:?} does not name {title:?}",
        notice.message()
    );
    eyre::ensure!(notice.kind() == expected, "notice kind is {}", notice.kind());
    eyre::ensure!(notice.is_read(), "resolved notice should be read");
    eyre::ensure!(notice.payload().is_none(), "resolved notice keeps its payload");
    Ok(())
}

#[then(r#"the rejection reason is "{reason}""#)]
fn rejection_reason_is(world: &AssignmentWorld, reason: String) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let rejection = task
        .rejection()
        .ok_or_else(|| eyre::eyre!("task carries no rejection"))?;
    eyre::ensure!(
        rejection.reason == reason,
        "expected reason {reason:?}, found {:?}",
        rejection.reason
    );
    Ok(())
}

#[then("the rejection is acknowledged")]
fn rejection_is_acknowledged(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    eyre::ensure!(
        task.rejection().is_some() && task.is_acknowledged(),
        "rejection was not acknowledged"
    );
    eyre::ensure!(!task.awaits_acknowledgement(), "task still awaits acknowledgement");
    Ok(())
}

#[then("the move is refused")]
fn move_is_refused(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;
    eyre::ensure!(
        matches!(result, Err(WorkspaceError::Forbidden { .. })),
        "expected a forbidden move, got {result:?}"
    );
    Ok(())
}
