use super::*;

/// Tests moving a session by less than the conflict window.
///
/// Verifies that the session being moved doesn't conflict with itself.
///
/// Expected: Ok(Some) with the new date
#[tokio::test]
async fn excludes_own_session_from_conflicts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;
    let session = SessionFactory::new(db, buddy.id, learner.id)
        .date(date)
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let new_date = date + Duration::minutes(30);
    let moved = repo.reschedule(session.id, new_date).await?.unwrap();

    assert_eq!(moved.date, new_date);

    Ok(())
}

/// Tests moving a session onto another booking.
///
/// Expected: Ok(None) and the original date is unchanged
#[tokio::test]
async fn rejects_conflicting_date() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let date = future_at_hour(10);
    let learner = factory::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;
    let session = SessionFactory::new(db, buddy.id, learner.id)
        .date(date)
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, learner.id)
        .date(date + Duration::hours(4))
        .status("CONFIRMED")
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let result = repo
        .reschedule(session.id, date + Duration::hours(4))
        .await?;

    assert!(result.is_none());
    let unchanged = repo.find_by_id(session.id).await?.unwrap();
    assert_eq!(unchanged.date, session.date);

    Ok(())
}
