use super::*;

/// Tests the upcoming sessions view.
///
/// Verifies that past and cancelled sessions are left out and each side is listed
/// separately.
///
/// Expected: Ok with one session as buddy and one as learner
#[tokio::test]
async fn lists_upcoming_sessions_per_side() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let user = factory::user::UserFactory::new(db).role("BOTH").build().await?;
    let buddy = factory::create_buddy(db).await?;
    let learner = factory::create_user(db).await?;
    let tomorrow = Utc::now() + Duration::days(1);

    SessionFactory::new(db, user.id, learner.id)
        .date(tomorrow)
        .status("CONFIRMED")
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, user.id)
        .date(tomorrow)
        .build()
        .await?;
    SessionFactory::new(db, user.id, learner.id)
        .date(Utc::now() - Duration::days(1))
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, user.id)
        .date(tomorrow)
        .status("CANCELLED")
        .build()
        .await?;

    let (as_buddy, as_learner) = UserService::new(db, &email)
        .upcoming_sessions(user.id)
        .await?;

    assert_eq!(as_buddy.len(), 1);
    assert_eq!(as_buddy[0].learner.id, learner.id);
    assert_eq!(as_learner.len(), 1);
    assert_eq!(as_learner[0].buddy.id, buddy.id);

    Ok(())
}

/// Tests the recent tickets view.
///
/// Expected: Ok with created and claimed tickets in their own lists
#[tokio::test]
async fn lists_recent_tickets() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let email = EmailService::log_only();

    let user = factory::create_buddy(db).await?;
    let other = factory::create_user(db).await?;
    TicketFactory::new(db, user.id).build().await?;
    TicketFactory::new(db, other.id)
        .claimed_by(user.id)
        .build()
        .await?;
    TicketFactory::new(db, other.id).build().await?;

    let (created, claimed) = UserService::new(db, &email)
        .recent_tickets(user.id)
        .await?;

    assert_eq!(created.len(), 1);
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].created_by.id, other.id);

    Ok(())
}
