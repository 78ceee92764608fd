use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, notification::NotificationFactory, user::UserFactory},
};

use crate::server::{error::AppError, scheduler::maintenance::daily_cleanup};

/// Tests that the daily cleanup only removes old read notifications.
///
/// Unread notifications and recently read ones are kept regardless of age.
///
/// Expected: Ok with 1 deleted and 3 remaining
#[tokio::test]
async fn deletes_old_read_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    let old = now - Duration::days(31);

    NotificationFactory::new(db, user.id)
        .read(true)
        .created_at(old)
        .build()
        .await?;
    NotificationFactory::new(db, user.id)
        .read(false)
        .created_at(old)
        .build()
        .await?;
    NotificationFactory::new(db, user.id)
        .read(true)
        .created_at(now - Duration::days(2))
        .build()
        .await?;
    factory::create_notification(db, user.id).await?;

    let report = daily_cleanup(db, now).await?;
    assert_eq!(report.notifications_deleted, 1);

    let remaining = entity::prelude::Notification::find().all(db).await?;
    assert_eq!(remaining.len(), 3);

    Ok(())
}

/// Tests that the daily cleanup clears only reset tokens that have expired.
///
/// Expected: Ok with 1 cleared, the live token kept
#[tokio::test]
async fn clears_expired_reset_tokens() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let expired = UserFactory::new(db)
        .password_reset("stale-token", now - Duration::minutes(5))
        .build()
        .await?;
    let live = UserFactory::new(db)
        .password_reset("live-token", now + Duration::minutes(30))
        .build()
        .await?;

    let report = daily_cleanup(db, now).await?;
    assert_eq!(report.reset_tokens_cleared, 1);

    let expired = find_user(db, expired.id).await?;
    assert!(expired.password_reset_token.is_none());
    assert!(expired.password_reset_expires.is_none());

    let live = find_user(db, live.id).await?;
    assert_eq!(live.password_reset_token.as_deref(), Some("live-token"));

    Ok(())
}

/// Tests the cleanup on an empty database.
///
/// Expected: Ok with nothing deleted or cleared
#[tokio::test]
async fn cleanup_with_nothing_to_do() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let report = daily_cleanup(db, Utc::now()).await?;
    assert_eq!(report.notifications_deleted, 0);
    assert_eq!(report.reset_tokens_cleared, 0);

    Ok(())
}

async fn find_user(
    db: &sea_orm::DatabaseConnection,
    id: uuid::Uuid,
) -> Result<entity::user::Model, DbErr> {
    entity::prelude::User::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound("user".to_string()))
}
