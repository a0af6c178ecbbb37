//! Given steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, PASSWORD, run_async};
use eyre::WrapErr;
use novatra::{
    identity::{domain::GlobalRole, services::RegisterUserRequest},
    project::{domain::ProjectRole, services::CreateProjectRequest},
};
use rstest_bdd_macros::given;

#[given(r#"an administrator "{name}" owning project "{project}""#)]
fn administrator_owning_project(
    world: &mut AssignmentWorld,
    name: String,
    project: String,
) -> Result<(), eyre::Report> {
    let email = format!("{}@example.com", name.to_lowercase());
    run_async(world.workspace.register(
        RegisterUserRequest::new(name, "Tester", email.clone(), PASSWORD)
            .with_role(GlobalRole::Admin),
    ))
    .wrap_err("register scenario administrator")?;
    let created = run_async(
        world
            .workspace
            .create_project(CreateProjectRequest::new(project)),
    )
    .wrap_err("create scenario project")?;
    world.admin_email = Some(email);
    world.project = Some(created);
    Ok(())
}

#[given(r#"a member "{name}" of the project"#)]
fn member_of_project(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let email = format!("{}@example.com", name.to_lowercase());
    run_async(world.workspace.register(RegisterUserRequest::new(
        name,
        "Tester",
        email.clone(),
        PASSWORD,
    )))
    .wrap_err("register scenario member")?;
    world.sign_in_as_admin()?;
    let project_id = world.project()?.id();
    run_async(
        world
            .workspace
            .add_member_by_email(project_id, &email, ProjectRole::User),
    )
    .wrap_err("add scenario member")?;
    world.member_email = Some(email);
    Ok(())
}
