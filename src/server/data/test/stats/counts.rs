use super::*;

/// Tests per-user session counts.
///
/// Verifies side-specific counts, status filtering and distinct partner counts.
///
/// Expected: Ok with 3 sessions as buddy, 2 completed with 1 distinct learner
#[tokio::test]
async fn counts_sessions_by_side_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    let learner = factory::create_user(db).await?;
    for status in ["COMPLETED", "COMPLETED", "PENDING"] {
        SessionFactory::new(db, buddy.id, learner.id)
            .status(status)
            .build()
            .await?;
    }

    let repo = StatsRepository::new(db);

    assert_eq!(repo.count_sessions(buddy.id, SessionSide::Buddy, None).await?, 3);
    assert_eq!(repo.count_sessions(buddy.id, SessionSide::Learner, None).await?, 0);
    assert_eq!(
        repo.count_sessions(
            buddy.id,
            SessionSide::Buddy,
            Some(&[SessionStatus::Completed][..])
        )
        .await?,
        2
    );
    assert_eq!(
        repo.count_distinct_completed_partners(buddy.id, SessionSide::Buddy)
            .await?,
        1
    );
    assert_eq!(
        repo.count_distinct_completed_partners(learner.id, SessionSide::Learner)
            .await?,
        1
    );

    Ok(())
}

/// Tests ticket counts for creator and claimer.
///
/// Expected: Ok with resolved tickets counted for both sides
#[tokio::test]
async fn counts_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let learner = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    factory::create_ticket(db, learner.id).await?;
    TicketFactory::new(db, learner.id)
        .claimed_by(buddy.id)
        .status("RESOLVED")
        .build()
        .await?;

    let repo = StatsRepository::new(db);

    assert_eq!(repo.count_tickets_created(learner.id).await?, 2);
    assert_eq!(repo.count_tickets_claimed(buddy.id).await?, 1);
    assert_eq!(repo.count_tickets_resolved(learner.id).await?, 1);
    assert_eq!(repo.count_tickets_resolved(buddy.id).await?, 1);
    assert_eq!(repo.count_all_tickets().await?, 2);

    Ok(())
}
