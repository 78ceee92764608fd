use super::*;

/// Tests the active user window.
///
/// Verifies that recent sessions mark both participants active, recent tickets mark
/// their creator active, and old activity is ignored.
///
/// Expected: Ok with three active users
#[tokio::test]
async fn collects_recent_participants_and_creators() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let buddy = factory::create_buddy(db).await?;
    let learner = factory::create_user(db).await?;
    let ticket_author = factory::create_user(db).await?;
    let dormant_buddy = factory::create_buddy(db).await?;
    let dormant_learner = factory::create_user(db).await?;

    SessionFactory::new(db, buddy.id, learner.id)
        .date(now - Duration::days(2))
        .build()
        .await?;
    SessionFactory::new(db, dormant_buddy.id, dormant_learner.id)
        .date(now - Duration::days(45))
        .build()
        .await?;
    factory::create_ticket(db, ticket_author.id).await?;

    let repo = StatsRepository::new(db);
    let active = repo.active_user_ids(now - Duration::days(30)).await?;

    assert_eq!(active.len(), 3);
    assert!(active.contains(&buddy.id));
    assert!(active.contains(&learner.id));
    assert!(active.contains(&ticket_author.id));
    assert!(!active.contains(&dormant_buddy.id));

    Ok(())
}
