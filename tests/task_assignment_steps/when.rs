//! When steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use eyre::WrapErr;
use novatra::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, TransitionOutcome},
};
use rstest_bdd_macros::when;

fn keep_outcome(world: &mut AssignmentWorld, outcome: TransitionOutcome) -> Result<(), eyre::Report> {
    let task = outcome
        .into_task()
        .ok_or_else(|| eyre::eyre!("expected the transition to apply"))?;
    world.task = Some(task);
    Ok(())
}

#[when(r#"the administrator assigns "{title}" to the member"#)]
fn admin_assigns_task(world: &mut AssignmentWorld, title: String) -> Result<(), eyre::Report> {
    world.sign_in_as_admin()?;
    let member_email = world
        .member_email
        .clone()
        .ok_or_else(|| eyre::eyre!("missing member in scenario world"))?;
    let member = run_async(world.workspace.identity().get_user_by_email(&member_email))
        .wrap_err("look up scenario member")?
        .ok_or_else(|| eyre::eyre!("scenario member is not registered"))?;
    let request = CreateTaskRequest::new(world.project()?.id(), title).with_assignee(member.id());
    let task = run_async(world.workspace.create_task(request)).wrap_err("assign task")?;
    world.task = Some(task);
    Ok(())
}

#[when(r#"the administrator creates "{title}" for themselves"#)]
fn admin_creates_own_task(world: &mut AssignmentWorld, title: String) -> Result<(), eyre::Report> {
    world.sign_in_as_admin()?;
    let request = CreateTaskRequest::new(world.project()?.id(), title);
    let task = run_async(world.workspace.create_task(request)).wrap_err("create task")?;
    world.task = Some(task);
    Ok(())
}

#[when("the member accepts the task")]
fn member_accepts(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    world.sign_in_as_member()?;
    let outcome = run_async(world.workspace.accept_assigned_task(world.task_id()?))
        .wrap_err("accept task")?;
    keep_outcome(world, outcome)
}

#[when("the member rejects the task without a reason")]
fn member_rejects(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    world.sign_in_as_member()?;
    let outcome = run_async(world.workspace.reject_assigned_task(world.task_id()?, "  "))
        .wrap_err("reject task")?;
    keep_outcome(world, outcome)
}

#[when("the administrator acknowledges the rejection")]
fn admin_acknowledges(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    world.sign_in_as_admin()?;
    let outcome = run_async(world.workspace.acknowledge_rejection(world.task_id()?))
        .wrap_err("acknowledge rejection")?;
    keep_outcome(world, outcome)
}

#[when(r#"the member moves the task to "{status}""#)]
fn member_moves_task(world: &mut AssignmentWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    world.sign_in_as_member()?;
    let result = run_async(world.workspace.move_task(world.task_id()?, target));
    if let Ok(ref moved) = result {
        world.task = Some(moved.clone());
    }
    world.last_move = Some(result);
    Ok(())
}
