//! [`ActivityLog`] backed by the project service.

use super::ProjectService;
use crate::project::{
    domain::{ActivityRecord, NewActivity, ProjectId},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult, InvitationRepository, ProjectRepository},
};
use async_trait::async_trait;
use mockable::Clock;

#[async_trait]
impl<P, I, C> ActivityLog for ProjectService<P, I, C>
where
    P: ProjectRepository,
    I: InvitationRepository,
    C: Clock + Send + Sync,
{
    async fn record(
        &self,
        project_id: ProjectId,
        activity: NewActivity,
    ) -> ActivityLogResult<Option<ActivityRecord>> {
        self.add_activity(project_id, activity)
            .await
            .map_err(ActivityLogError::new)
    }
}
