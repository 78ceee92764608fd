use super::*;

/// Tests booking a free slot inside the buddy's availability.
///
/// Verifies that the session is inserted as pending with the given meeting link.
///
/// Expected: Ok(Some) with a pending session
#[tokio::test]
async fn books_free_slot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;

    let repo = SessionRepository::new(db);
    let session = repo.book(booking(buddy.id, learner.id, date)).await?.unwrap();

    assert_eq!(session.status, SessionStatus::Pending);
    assert_eq!(session.buddy_id, buddy.id);
    assert_eq!(session.learner_id, learner.id);
    assert_eq!(
        session.meeting_link.as_deref(),
        Some("https://meet.google.com/abc-defg-hij")
    );

    Ok(())
}

/// Tests that the window end is exclusive.
///
/// Verifies that a booking exactly at a window's end time is rejected while one at
/// its start time is accepted.
///
/// Expected: Ok(None) at 10:00, Ok(Some) at 09:00
#[tokio::test]
async fn window_end_is_exclusive() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let start = future_at_hour(9);
    let end = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    factory::create_availability(db, buddy.id, weekday_index(start), "09:00", "10:00").await?;

    let repo = SessionRepository::new(db);

    assert!(repo.book(booking(buddy.id, learner.id, end)).await?.is_none());
    assert!(repo.book(booking(buddy.id, learner.id, start)).await?.is_some());

    Ok(())
}

/// Tests booking on a weekday the buddy has no window for.
///
/// Expected: Ok(None)
#[tokio::test]
async fn rejects_other_weekday() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let other_day = (weekday_index(date) + 1) % 7;
    factory::create_availability(db, buddy.id, other_day, "00:00", "23:59").await?;

    let repo = SessionRepository::new(db);
    let result = repo.book(booking(buddy.id, learner.id, date)).await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests the double-booking window around an existing session.
///
/// Verifies that an active session from 30 minutes before to 90 minutes after the
/// requested start blocks it, inclusive on both ends, and that sessions just outside
/// that range do not.
///
/// Expected: Ok(None) for blocking offsets, Ok(Some) otherwise
#[tokio::test]
async fn enforces_conflict_window() -> Result<(), DbErr> {
    let date = future_at_hour(12);

    for (offset_minutes, blocked) in [(-30, true), (-31, false), (90, true), (91, false), (0, true)]
    {
        let test = TestBuilder::new().with_session_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let learner = factory::create_user(db).await?;
        let buddy = create_bookable_buddy(db, date).await?;
        SessionFactory::new(db, buddy.id, learner.id)
            .date(date + Duration::minutes(offset_minutes))
            .build()
            .await?;

        let repo = SessionRepository::new(db);
        let result = repo.book(booking(buddy.id, learner.id, date)).await?;

        assert_eq!(
            result.is_none(),
            blocked,
            "existing session at offset {offset_minutes} min"
        );
    }

    Ok(())
}

/// Tests that cancelled and completed sessions free their slot.
///
/// Expected: Ok(Some) despite sessions at the same time
#[tokio::test]
async fn ignores_inactive_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(15);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;
    for status in ["CANCELLED", "COMPLETED"] {
        SessionFactory::new(db, buddy.id, learner.id)
            .date(date)
            .status(status)
            .build()
            .await?;
    }

    let repo = SessionRepository::new(db);
    let result = repo.book(booking(buddy.id, learner.id, date)).await?;

    assert!(result.is_some());

    Ok(())
}

/// Tests that a booking starting shortly before an existing session fails.
///
/// The existing session starts 45 minutes after the second request, inside the
/// 90 minute window that follows it.
///
/// Expected: first Ok(Some), second Ok(None)
#[tokio::test]
async fn prevents_double_booking() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(11);
    let first_learner = factory::create_user(db).await?;
    let second_learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;

    let repo = SessionRepository::new(db);
    let first = repo.book(booking(buddy.id, first_learner.id, date)).await?;
    let second = repo
        .book(booking(buddy.id, second_learner.id, date - Duration::minutes(45)))
        .await?;

    assert!(first.is_some());
    assert!(second.is_none());

    Ok(())
}
