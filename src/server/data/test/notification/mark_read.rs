use super::*;

/// Tests marking another user's notification as read.
///
/// Expected: Ok(false) and the notification stays unread
#[tokio::test]
async fn mark_read_requires_ownership() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let notification = factory::create_notification(db, owner.id).await?;

    let repo = NotificationRepository::new(db);

    assert!(!repo.mark_read(notification.id, other.id).await?);
    assert_eq!(repo.count_unread(owner.id).await?, 1);
    assert!(repo.mark_read(notification.id, owner.id).await?);
    assert_eq!(repo.count_unread(owner.id).await?, 0);

    Ok(())
}

/// Tests marking all notifications read.
///
/// Expected: Ok(2), counting only the ones that were unread
#[tokio::test]
async fn marks_all_unread_as_read() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_notification(db, user.id).await?;
    factory::create_notification(db, user.id).await?;
    NotificationFactory::new(db, user.id).read(true).build().await?;

    let repo = NotificationRepository::new(db);

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.count_unread(user.id).await?, 0);

    Ok(())
}

/// Tests listing with unread and type filters.
///
/// Expected: Ok with only the unread TICKET_CLAIMED notification
#[tokio::test]
async fn filters_unread_by_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = NotificationRepository::new(db);
    repo.create_many(vec![
        CreateNotificationParams::new(
            user.id,
            NotificationType::TicketClaimed,
            "claimed".to_string(),
        ),
        CreateNotificationParams::new(
            user.id,
            NotificationType::SessionBooked,
            "booked".to_string(),
        ),
    ])
    .await?;
    NotificationFactory::new(db, user.id)
        .notification_type("TICKET_CLAIMED")
        .read(true)
        .build()
        .await?;

    let page = repo
        .get_paginated(
            user.id,
            &NotificationFilter {
                unread_only: true,
                notification_type: Some(NotificationType::TicketClaimed),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].message, "claimed");

    Ok(())
}
