//! Unit tests for the workspace module.

mod task_flow_tests;

use crate::{
    identity::{domain::User, services::RegisterUserRequest},
    workspace::Workspace,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

type TestWorkspace = Workspace<DefaultClock>;

#[fixture]
fn workspace() -> TestWorkspace {
    Workspace::new(Arc::new(DefaultClock))
}

async fn register(workspace: &TestWorkspace, first: &str, email: &str) -> User {
    workspace
        .register(RegisterUserRequest::new(first, "Tester", email, "secret"))
        .await
        .expect("registration")
}
