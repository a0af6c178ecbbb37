//! Service tests for the notification mailbox.

use std::sync::Arc;

use crate::{
    identity::domain::UserId,
    notification::{
        adapters::memory::InMemoryNotificationRepository,
        domain::{
            NewNotification, NotificationId, NotificationKind, NotificationPayload,
            NotificationUpdate,
        },
        ports::NotificationSink,
        services::NotificationService,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

type TestService = NotificationService<InMemoryNotificationRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    NotificationService::new(
        Arc::new(InMemoryNotificationRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn info(user_id: UserId, message: &str) -> NewNotification {
    NewNotification::new(user_id, NotificationKind::Info, message)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_notifications_start_unread(service: TestService) {
    let recipient = UserId::new();
    let created = service
        .create_notification(info(recipient, "hello"))
        .await
        .expect("create notification");

    assert!(!created.is_read());
    assert_eq!(created.user_id(), recipient);
    assert_eq!(service.get_unread_count(recipient).await.expect("count"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mailbox_is_newest_first_and_scoped_to_recipient(service: TestService) {
    let recipient = UserId::new();
    let other = UserId::new();
    for message in ["first", "second", "third"] {
        service
            .create_notification(info(recipient, message))
            .await
            .expect("create notification");
    }
    service
        .create_notification(info(other, "elsewhere"))
        .await
        .expect("create notification");

    let mailbox = service
        .get_user_notifications(recipient)
        .await
        .expect("mailbox");
    let messages: Vec<_> = mailbox.iter().map(|entry| entry.message()).collect();

    assert_eq!(messages, vec!["third", "second", "first"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_all_as_read_only_touches_recipient(service: TestService) {
    let recipient = UserId::new();
    let other = UserId::new();
    let first = service
        .create_notification(info(recipient, "one"))
        .await
        .expect("create");
    service
        .create_notification(info(recipient, "two"))
        .await
        .expect("create");
    service
        .create_notification(info(other, "three"))
        .await
        .expect("create");
    service.mark_as_read(first.id()).await.expect("mark read");

    let changed = service
        .mark_all_as_read(recipient)
        .await
        .expect("mark all");

    assert_eq!(changed, 1);
    assert_eq!(service.get_unread_count(recipient).await.expect("count"), 0);
    assert_eq!(service.get_unread_count(other).await.expect("count"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_notifications_are_reported(service: TestService) {
    let missing = NotificationId::new();

    assert!(service.mark_as_read(missing).await.expect("mark").is_none());
    assert!(
        service
            .update_notification(missing, NotificationUpdate::default())
            .await
            .expect("update")
            .is_none()
    );
    assert!(
        service
            .resolve(missing, "done", NotificationKind::Info)
            .await
            .expect("resolve")
            .is_none()
    );
    assert!(service.delete_notification(missing).await.expect("delete").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resolving_an_assignment_detaches_it_from_the_task(service: TestService) {
    let recipient = UserId::new();
    let task_id = Uuid::new_v4();
    let notice = service
        .create_notification(
            NewNotification::new(recipient, NotificationKind::TaskAssigned, "new task")
                .with_payload(NotificationPayload::Task { task_id }),
        )
        .await
        .expect("create");

    let found = service.find_by_task(task_id).await.expect("find by task");
    assert_eq!(found.as_ref().map(|entry| entry.id()), Some(notice.id()));

    let resolved = service
        .resolve(notice.id(), "Task rejected", NotificationKind::Error)
        .await
        .expect("resolve")
        .expect("notification exists");

    assert_eq!(resolved.kind(), NotificationKind::Error);
    assert!(resolved.is_read());
    assert_eq!(resolved.payload(), None);
    assert!(service.find_by_task(task_id).await.expect("find").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sink_delivers_into_the_mailbox(service: TestService) {
    let recipient = UserId::new();
    let delivered = service
        .notify(info(recipient, "via sink"))
        .await
        .expect("notify");

    let all = service.list_all().await.expect("list");
    assert_eq!(all, vec![delivered]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_notification_is_gone(service: TestService) {
    let recipient = UserId::new();
    let created = service
        .create_notification(info(recipient, "bye"))
        .await
        .expect("create");

    let removed = service
        .delete_notification(created.id())
        .await
        .expect("delete");

    assert_eq!(removed, Some(created));
    assert!(service.list_all().await.expect("list").is_empty());
}
