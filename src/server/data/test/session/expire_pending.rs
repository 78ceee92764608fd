use super::*;
use chrono::Utc;

/// Tests cancelling pending sessions whose date has passed.
///
/// Verifies that only past pending sessions change; future pending and past confirmed
/// sessions are left alone.
///
/// Expected: Ok(1) and only the stale session cancelled
#[tokio::test]
async fn cancels_only_past_pending_sessions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let now = Utc::now();
    let stale = SessionFactory::new(db, buddy.id, learner.id)
        .date(now - Duration::hours(1))
        .build()
        .await?;
    let upcoming = SessionFactory::new(db, buddy.id, learner.id)
        .date(now + Duration::hours(1))
        .build()
        .await?;
    let confirmed = SessionFactory::new(db, buddy.id, learner.id)
        .date(now - Duration::hours(1))
        .status("CONFIRMED")
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let count = repo.expire_pending(now).await?;

    assert_eq!(count, 1);
    assert_eq!(
        repo.find_by_id(stale.id).await?.unwrap().status,
        SessionStatus::Cancelled
    );
    assert_eq!(
        repo.find_by_id(upcoming.id).await?.unwrap().status,
        SessionStatus::Pending
    );
    assert_eq!(
        repo.find_by_id(confirmed.id).await?.unwrap().status,
        SessionStatus::Confirmed
    );

    Ok(())
}

/// Tests completing confirmed sessions past the cutoff.
///
/// Verifies that a confirmed session three hours old completes with a two hour cutoff,
/// while one an hour old does not.
///
/// Expected: Ok(1)
#[tokio::test]
async fn completes_confirmed_sessions_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_session_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let now = Utc::now();
    let finished = SessionFactory::new(db, buddy.id, learner.id)
        .date(now - Duration::hours(3))
        .status("CONFIRMED")
        .build()
        .await?;
    let ongoing = SessionFactory::new(db, buddy.id, learner.id)
        .date(now - Duration::hours(1))
        .status("CONFIRMED")
        .build()
        .await?;

    let repo = SessionRepository::new(db);
    let count = repo.complete_ongoing(now - Duration::hours(2)).await?;

    assert_eq!(count, 1);
    assert_eq!(
        repo.find_by_id(finished.id).await?.unwrap().status,
        SessionStatus::Completed
    );
    assert_eq!(
        repo.find_by_id(ongoing.id).await?.unwrap().status,
        SessionStatus::Confirmed
    );

    Ok(())
}
