use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, session::SessionFactory, ticket::TicketFactory},
};

use crate::server::{error::AppError, service::stats::StatsService};

/// Tests per-user stats across both session sides and tickets.
///
/// Verifies that hours count completed sessions, pending counts pending plus
/// confirmed, and resolved counts finished tickets the user created or claimed.
///
/// Expected: Ok with the counts seeded below
#[tokio::test]
async fn computes_user_stats() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).role("BOTH").build().await?;
    let learner_a = factory::create_user(db).await?;
    let learner_b = factory::create_user(db).await?;
    let buddy = factory::create_buddy(db).await?;
    let past = Utc::now() - Duration::days(3);

    SessionFactory::new(db, user.id, learner_a.id)
        .date(past)
        .status("COMPLETED")
        .build()
        .await?;
    SessionFactory::new(db, user.id, learner_b.id)
        .date(past)
        .status("COMPLETED")
        .build()
        .await?;
    SessionFactory::new(db, user.id, learner_a.id)
        .status("CONFIRMED")
        .build()
        .await?;
    SessionFactory::new(db, buddy.id, user.id).build().await?;

    TicketFactory::new(db, user.id).status("RESOLVED").build().await?;
    TicketFactory::new(db, learner_a.id)
        .claimed_by(user.id)
        .build()
        .await?;

    let stats = StatsService::new(db).user_stats(user.id).await?;

    assert_eq!(stats.total_sessions, 4);
    assert_eq!(stats.sessions_as_buddy, 3);
    assert_eq!(stats.sessions_as_learner, 1);
    assert_eq!(stats.completed_sessions, 2);
    assert_eq!(stats.total_hours, 2);
    assert_eq!(stats.people_helped, 2);
    assert_eq!(stats.helped_by, 0);
    assert_eq!(stats.pending_sessions, 2);
    assert_eq!(stats.tickets_created, 1);
    assert_eq!(stats.tickets_claimed, 1);
    assert_eq!(stats.total_tickets, 2);
    assert_eq!(stats.tickets_resolved, 1);

    Ok(())
}

/// Tests stats for an unknown user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn user_stats_require_known_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = StatsService::new(db).user_stats(uuid::Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests global stats on an empty platform.
///
/// Expected: Ok with all zeros and a rate of 0
#[tokio::test]
async fn global_stats_on_empty_platform() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let stats = StatsService::new(db).global_stats().await?;

    assert_eq!(stats.total_users, 0);
    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.active_session_rate, 0);

    Ok(())
}

/// Tests global totals, active users and the completion rate.
///
/// Verifies that a user whose only session is older than 30 days is not active.
///
/// Expected: Ok with 3 of 4 sessions completed, a rate of 75 and 2 active users
#[tokio::test]
async fn computes_global_stats() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let buddy = factory::create_buddy(db).await?;
    let learner = factory::create_user(db).await?;
    let old_buddy = factory::create_buddy(db).await?;
    let old_learner = factory::create_user(db).await?;
    let recent = Utc::now() - Duration::days(2);

    for _ in 0..2 {
        SessionFactory::new(db, buddy.id, learner.id)
            .date(recent)
            .status("COMPLETED")
            .build()
            .await?;
    }
    SessionFactory::new(db, buddy.id, learner.id)
        .date(recent)
        .build()
        .await?;
    SessionFactory::new(db, old_buddy.id, old_learner.id)
        .date(Utc::now() - Duration::days(60))
        .status("COMPLETED")
        .build()
        .await?;

    let stats = StatsService::new(db).global_stats().await?;

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_sessions, 4);
    assert_eq!(stats.completed_sessions, 3);
    assert_eq!(stats.active_session_rate, 75);
    assert_eq!(stats.active_users, 2);
    assert_eq!(stats.total_tickets, 0);

    Ok(())
}
