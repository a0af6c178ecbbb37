//! Integration tests for onboarding a team through the workspace.

use super::helpers::{PASSWORD, TestWorkspace, register, workspace};
use novatra::{
    identity::domain::GlobalRole,
    notification::domain::NotificationKind,
    project::{
        domain::{InvitationResponse, MembershipChange, ProjectRole},
        services::CreateProjectRequest,
    },
    workspace::WorkspaceError,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invited_user_joins_after_accepting(workspace: TestWorkspace) -> Result<(), eyre::Report> {
    let zoe = register(&workspace, "Zoe", GlobalRole::User).await?;
    register(&workspace, "Ada", GlobalRole::Admin).await?;
    let project = workspace
        .create_project(CreateProjectRequest::new("Apollo").with_description("Moon"))
        .await?;
    workspace
        .invite_member(project.id(), "zoe@example.com", ProjectRole::User)
        .await?;

    workspace.login("zoe@example.com", PASSWORD).await?;
    eyre::ensure!(workspace.my_projects().await?.is_empty(), "not a member yet");
    let prompt = workspace
        .my_notifications()
        .await?
        .into_iter()
        .find(|entry| entry.kind() == NotificationKind::ProjectInvitation)
        .ok_or_else(|| eyre::eyre!("missing invitation prompt"))?;
    let resolution = workspace
        .respond_to_invitation_notification(prompt.id(), InvitationResponse::Accepted)
        .await?;

    eyre::ensure!(
        resolution.membership == Some(MembershipChange::Added),
        "expected a new membership, got {:?}",
        resolution.membership
    );
    let joined = workspace.my_projects().await?;
    eyre::ensure!(joined.len() == 1, "expected one project, found {}", joined.len());
    let feed = workspace
        .projects()
        .activity_feed(project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    let newest = feed
        .first()
        .ok_or_else(|| eyre::eyre!("empty activity feed"))?;
    eyre::ensure!(
        newest.message == "New member added to the project (user)",
        "unexpected feed entry {:?}",
        newest.message
    );
    eyre::ensure!(newest.user_id != zoe.id(), "membership is attributed to the inviter");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn answered_invitations_cannot_be_answered_again(
    workspace: TestWorkspace,
) -> Result<(), eyre::Report> {
    register(&workspace, "Zoe", GlobalRole::User).await?;
    register(&workspace, "Ada", GlobalRole::Admin).await?;
    let project = workspace
        .create_project(CreateProjectRequest::new("Apollo"))
        .await?;
    workspace
        .invite_member(project.id(), "zoe@example.com", ProjectRole::Admin)
        .await?;
    workspace.login("zoe@example.com", PASSWORD).await?;
    let prompt = workspace
        .my_notifications()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| eyre::eyre!("missing invitation prompt"))?;
    workspace
        .respond_to_invitation_notification(prompt.id(), InvitationResponse::Accepted)
        .await?;

    let again = workspace
        .respond_to_invitation_notification(prompt.id(), InvitationResponse::Accepted)
        .await;

    eyre::ensure!(
        matches!(again, Err(WorkspaceError::NotAnInvitation(id)) if id == prompt.id()),
        "expected the resolved prompt to carry no invitation, got {again:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn logging_out_ends_access(workspace: TestWorkspace) -> Result<(), eyre::Report> {
    register(&workspace, "Ada", GlobalRole::User).await?;
    workspace.logout().await?;

    let listing = workspace.my_projects().await;
    let wrong_password = workspace.login("ada@example.com", "nope").await;

    eyre::ensure!(
        matches!(listing, Err(WorkspaceError::Unauthenticated)),
        "expected unauthenticated, got {listing:?}"
    );
    eyre::ensure!(
        matches!(wrong_password, Err(WorkspaceError::Identity(_))),
        "expected a credential error, got {wrong_password:?}"
    );
    eyre::ensure!(workspace.current_user().await?.is_none(), "session leaked");
    Ok(())
}
