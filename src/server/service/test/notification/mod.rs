use test_utils::{
    builder::TestBuilder,
    factory::{self, notification::NotificationFactory},
};

use crate::{
    model::notification::NotificationType,
    server::{
        error::AppError, model::notification::NotificationFilter,
        service::notification::NotificationService,
    },
};

/// Tests listing a user's notifications with the unread count.
///
/// Verifies that other users' notifications are excluded and the unread filter works.
///
/// Expected: Ok with 3 listed, 2 unread, and 2 when filtering unread only
#[tokio::test]
async fn lists_with_unread_count() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;
    NotificationFactory::new(db, user.id).read(true).build().await?;
    factory::create_notification(db, other.id).await?;

    let service = NotificationService::new(db);

    let (page, unread) = service.list(user.id, NotificationFilter::default()).await?;
    assert_eq!(page.total, 3);
    assert_eq!(unread, 2);

    let (unread_page, _) = service
        .list(
            user.id,
            NotificationFilter {
                unread_only: true,
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(unread_page.total, 2);

    Ok(())
}

/// Tests filtering by notification type.
///
/// Expected: Ok with only the TICKET_CLAIMED notification
#[tokio::test]
async fn filters_by_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    NotificationFactory::new(db, user.id)
        .notification_type("TICKET_CLAIMED")
        .build()
        .await?;

    let (page, _) = NotificationService::new(db)
        .list(
            user.id,
            NotificationFilter {
                notification_type: Some(NotificationType::TicketClaimed),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].notification_type, NotificationType::TicketClaimed);

    Ok(())
}

/// Tests marking and deleting another user's notification.
///
/// Expected: Err(AppError::NotFound("Notification not found")) for both
#[tokio::test]
async fn hides_foreign_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::create_notification(db, owner.id).await?;

    let service = NotificationService::new(db);

    let mark = service.mark_read(notification.id, other.id).await;
    assert!(matches!(mark, Err(AppError::NotFound(ref msg)) if msg == "Notification not found"));

    let delete = service.delete(notification.id, other.id).await;
    assert!(matches!(delete, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests marking everything read.
///
/// Expected: Ok(2), then an unread count of 0
#[tokio::test]
async fn marks_all_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;

    let service = NotificationService::new(db);

    assert_eq!(service.mark_all_read(user.id).await?, 2);
    assert_eq!(service.unread_count(user.id).await?, 0);

    Ok(())
}
