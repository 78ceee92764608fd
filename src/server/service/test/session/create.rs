use super::*;

/// Tests booking a free slot with a bookable buddy.
///
/// Verifies that the session starts pending with a generated Meet link and that both
/// participants get a SESSION_BOOKED notification.
///
/// Expected: Ok with a pending session and two notifications
#[tokio::test]
async fn books_session_and_notifies_both() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;

    let booked = SessionService::new(db, &email, &calendar)
        .create(&caller(&learner), booking(buddy.id, date))
        .await?;

    assert_eq!(booked.session.status, SessionStatus::Pending);
    assert_eq!(booked.buddy.id, buddy.id);
    assert_eq!(booked.learner.id, learner.id);
    let link = booked.session.meeting_link.unwrap();
    assert!(link.starts_with("https://meet.google.com/"));

    assert_eq!(count_notifications(db, buddy.id, "SESSION_BOOKED").await?, 1);
    assert_eq!(count_notifications(db, learner.id, "SESSION_BOOKED").await?, 1);

    Ok(())
}

/// Tests that a provided meeting link is kept.
///
/// Expected: Ok with the given link
#[tokio::test]
async fn keeps_provided_meeting_link() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;

    let mut dto = booking(buddy.id, date);
    dto.meeting_link = Some("https://zoom.example.com/room".to_string());

    let booked = SessionService::new(db, &email, &calendar)
        .create(&caller(&learner), dto)
        .await?;

    assert_eq!(
        booked.session.meeting_link.as_deref(),
        Some("https://zoom.example.com/room")
    );

    Ok(())
}

/// Tests booking a date in the past.
///
/// Expected: Err(AppError::BadRequest("Session date must be in the future"))
#[tokio::test]
async fn rejects_past_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let past = Utc::now() - Duration::hours(1);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, past).await?;

    let result = SessionService::new(db, &email, &calendar)
        .create(&caller(&learner), booking(buddy.id, past))
        .await;

    assert!(
        matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Session date must be in the future")
    );

    Ok(())
}

/// Tests booking with a user who is not an active buddy.
///
/// Covers a learner-only user, a suspended buddy and an unknown id.
///
/// Expected: Err(AppError::NotFound) for each
#[tokio::test]
async fn rejects_unavailable_buddy() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let other_learner = factory::create_user(db).await?;
    let suspended = factory::user::UserFactory::new(db)
        .role("BUDDY")
        .status("SUSPENDED")
        .build()
        .await?;

    let service = SessionService::new(db, &email, &calendar);

    for buddy_id in [other_learner.id, suspended.id, uuid::Uuid::new_v4()] {
        let result = service
            .create(&caller(&learner), booking(buddy_id, date))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    Ok(())
}

/// Tests a buddy booking a session with themself.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_self_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let buddy = create_bookable_buddy(db, date).await?;

    let result = SessionService::new(db, &email, &calendar)
        .create(&caller(&buddy), booking(buddy.id, date))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests booking inside the double-booking window of an existing session.
///
/// Expected: Err(AppError::Conflict) for a second booking 45 minutes earlier
#[tokio::test]
async fn rejects_double_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;

    let service = SessionService::new(db, &email, &calendar);
    service
        .create(&caller(&first), booking(buddy.id, date))
        .await?;

    let result = service
        .create(&caller(&second), booking(buddy.id, date - Duration::minutes(45)))
        .await;

    assert!(
        matches!(result, Err(AppError::Conflict(ref msg)) if msg == "Study buddy is not available at this time")
    );

    Ok(())
}

/// Tests booking outside the buddy's availability.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_outside_availability() -> Result<(), AppError> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();
    let calendar = CalendarService::new(None, None);

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;

    let result = SessionService::new(db, &email, &calendar)
        .create(&caller(&learner), booking(buddy.id, date))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
