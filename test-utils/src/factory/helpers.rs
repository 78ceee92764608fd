//! Shared helper utilities for factory methods.

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Returns the next instant at the given UTC hour, at least one day from now.
///
/// Useful for booking tests that need a future date landing on a known weekday and
/// time of day.
///
/// # Arguments
/// - `hour` - UTC hour of day (0-23)
///
/// # Returns
/// - `DateTime<Utc>` - Tomorrow (or later) at `hour:00:00`
pub fn future_at_hour(hour: u32) -> DateTime<Utc> {
    let tomorrow = Utc::now() + Duration::days(1);
    tomorrow
        .with_hour(hour)
        .and_then(|d| d.with_minute(0))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(tomorrow)
}

/// Day-of-week index (0 = Sunday) for a UTC instant.
pub fn weekday_index(date: DateTime<Utc>) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// Creates a verified, active buddy with a skill and a full-day availability window
/// on the weekday of `date`.
///
/// # Arguments
/// - `db` - Database connection
/// - `date` - Instant whose weekday gets the availability window
///
/// # Returns
/// - `Ok(entity::user::Model)` - The buddy
/// - `Err(DbErr)` - Database error during creation
pub async fn create_bookable_buddy(
    db: &DatabaseConnection,
    date: DateTime<Utc>,
) -> Result<entity::user::Model, DbErr> {
    let buddy = crate::factory::user::UserFactory::new(db)
        .role("BUDDY")
        .skills(["Calculus"])
        .build()
        .await?;

    crate::factory::availability::create_availability(
        db,
        buddy.id,
        weekday_index(date),
        "00:00",
        "23:59",
    )
    .await?;

    Ok(buddy)
}

/// Creates a learner, a bookable buddy and a session between them.
///
/// # Returns
/// - `Ok((learner, buddy, session))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_session_with_participants(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::user::Model,
        entity::session::Model,
    ),
    DbErr,
> {
    let date = future_at_hour(10);
    let learner = crate::factory::user::create_user(db).await?;
    let buddy = create_bookable_buddy(db, date).await?;
    let session = crate::factory::session::SessionFactory::new(db, buddy.id, learner.id)
        .date(date)
        .build()
        .await?;

    Ok((learner, buddy, session))
}
