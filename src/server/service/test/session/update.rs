use super::*;

/// Tests the buddy confirming a pending session.
///
/// Verifies that both participants get a SESSION_UPDATED notification.
///
/// Expected: Ok with status CONFIRMED
#[tokio::test]
async fn buddy_confirms_pending_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, buddy, session) = create_session_with_participants(db).await?;

    let updated = SessionService::new(db, &email, &calendar)
        .update(
            &caller(&buddy),
            session.id,
            UpdateSessionDto {
                status: Some(SessionStatus::Confirmed),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.session.status, SessionStatus::Confirmed);
    assert_eq!(count_notifications(db, buddy.id, "SESSION_UPDATED").await?, 1);
    assert_eq!(count_notifications(db, learner.id, "SESSION_UPDATED").await?, 1);

    Ok(())
}

/// Tests the learner trying to confirm.
///
/// Expected: Err(AppError::Forbidden)
#[tokio::test]
async fn learner_cannot_confirm() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, _, session) = create_session_with_participants(db).await?;

    let result = SessionService::new(db, &email, &calendar)
        .update(
            &caller(&learner),
            session.id,
            UpdateSessionDto {
                status: Some(SessionStatus::Confirmed),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests skipping straight from PENDING to COMPLETED.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_invalid_transition() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (_, buddy, session) = create_session_with_participants(db).await?;

    let result = SessionService::new(db, &email, &calendar)
        .update(
            &caller(&buddy),
            session.id,
            UpdateSessionDto {
                status: Some(SessionStatus::Completed),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that feedback is only accepted when the session ends up completed.
///
/// Expected: Err(AppError::BadRequest) on a pending session, Ok when completing
#[tokio::test]
async fn feedback_requires_completion() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, buddy, pending) = create_session_with_participants(db).await?;
    let confirmed = SessionFactory::new(db, buddy.id, learner.id)
        .date(future_at_hour(14))
        .status("CONFIRMED")
        .build()
        .await?;

    let service = SessionService::new(db, &email, &calendar);

    let rejected = service
        .update(
            &caller(&learner),
            pending.id,
            UpdateSessionDto {
                feedback: Some("Great session".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    let completed = service
        .update(
            &caller(&learner),
            confirmed.id,
            UpdateSessionDto {
                status: Some(SessionStatus::Completed),
                feedback: Some("Great session".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(completed.session.status, SessionStatus::Completed);
    assert_eq!(completed.session.feedback.as_deref(), Some("Great session"));

    Ok(())
}

/// Tests editing the topic of a confirmed session.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn details_locked_after_confirmation() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, buddy, _) = create_session_with_participants(db).await?;
    let confirmed = SessionFactory::new(db, buddy.id, learner.id)
        .date(future_at_hour(14))
        .status("CONFIRMED")
        .build()
        .await?;

    let result = SessionService::new(db, &email, &calendar)
        .update(
            &caller(&learner),
            confirmed.id,
            UpdateSessionDto {
                topic: Some("Integrals".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests rescheduling a pending session to a free slot.
///
/// Verifies that the session's own current slot does not block the move.
///
/// Expected: Ok with the new date
#[tokio::test]
async fn reschedules_pending_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (learner, _, session) = create_session_with_participants(db).await?;
    let new_date = session.date + Duration::minutes(30);

    let updated = SessionService::new(db, &email, &calendar)
        .update(
            &caller(&learner),
            session.id,
            UpdateSessionDto {
                date: Some(new_date),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.session.date, new_date);

    Ok(())
}

/// Tests a non-participant reading and updating a session.
///
/// Expected: Err(AppError::NotFound) for both
#[tokio::test]
async fn hides_session_from_outsiders() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (_, _, session) = create_session_with_participants(db).await?;
    let outsider = factory::create_user(db).await?;

    let service = SessionService::new(db, &email, &calendar);

    let read = service.get(&caller(&outsider), session.id).await;
    assert!(matches!(read, Err(AppError::NotFound(_))));

    let write = service
        .update(
            &caller(&outsider),
            session.id,
            UpdateSessionDto {
                status: Some(SessionStatus::Cancelled),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(write, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that staff can read any session.
///
/// Expected: Ok
#[tokio::test]
async fn staff_can_read_any_session() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let (_, _, session) = create_session_with_participants(db).await?;
    let staff = factory::user::UserFactory::new(db).role("STAFF").build().await?;

    let found = SessionService::new(db, &email, &calendar)
        .get(&caller(&staff), session.id)
        .await?;

    assert_eq!(found.session.id, session.id);

    Ok(())
}
