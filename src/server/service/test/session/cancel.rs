use super::*;

/// Tests cancelling a pending session.
///
/// Expected: Ok with status CANCELLED and SESSION_UPDATED notifications for both
#[tokio::test]
async fn cancels_active_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, buddy, session) = create_session_with_participants(db).await?;

    let cancelled = SessionService::new(db, &email, &calendar)
        .cancel(&caller(&learner), session.id)
        .await?;

    assert_eq!(cancelled.session.status, SessionStatus::Cancelled);
    assert_eq!(count_notifications(db, buddy.id, "SESSION_UPDATED").await?, 1);
    assert_eq!(count_notifications(db, learner.id, "SESSION_UPDATED").await?, 1);

    Ok(())
}

/// Tests cancelling a completed session.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_cancelling_finished_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let completed = SessionFactory::new(db, buddy.id, learner.id)
        .date(Utc::now() - Duration::days(1))
        .status("COMPLETED")
        .build()
        .await?;

    let result = SessionService::new(db, &email, &calendar)
        .cancel(&caller(&buddy), completed.id)
        .await;

    assert!(
        matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Cannot cancel a session that is COMPLETED")
    );

    Ok(())
}

/// Tests the expiry sweep over pending sessions.
///
/// Verifies that only pending sessions whose start has passed are cancelled.
///
/// Expected: Ok(1)
#[tokio::test]
async fn expires_stale_pending_sessions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    SessionFactory::new(db, buddy.id, learner.id)
        .date(Utc::now() - Duration::hours(1))
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, learner.id)
        .date(Utc::now() + Duration::hours(5))
        .build()
        .await?;

    let count = SessionService::new(db, &email, &calendar)
        .expire_pending()
        .await?;

    assert_eq!(count, 1);

    Ok(())
}

/// Tests the auto-completion sweep over confirmed sessions.
///
/// Verifies that a confirmed session that started three hours ago completes while one
/// that started an hour ago is still considered in progress.
///
/// Expected: Ok(1)
#[tokio::test]
async fn completes_past_due_sessions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    SessionFactory::new(db, buddy.id, learner.id)
        .date(Utc::now() - Duration::hours(3))
        .status("CONFIRMED")
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, learner.id)
        .date(Utc::now() - Duration::hours(1))
        .status("CONFIRMED")
        .build()
        .await?;

    let count = SessionService::new(db, &email, &calendar)
        .complete_ongoing()
        .await?;

    assert_eq!(count, 1);

    Ok(())
}
