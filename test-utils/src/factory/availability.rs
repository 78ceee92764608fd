//! Availability factory for creating buddy time windows.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates an availability window for a user.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Owner of the window
/// - `day_of_week` - 0 = Sunday through 6 = Saturday
/// - `start_time` / `end_time` - Zero-padded `HH:MM`
///
/// # Returns
/// - `Ok(entity::availability::Model)` - Created window
/// - `Err(DbErr)` - Database error during insert
pub async fn create_availability(
    db: &DatabaseConnection,
    user_id: Uuid,
    day_of_week: i32,
    start_time: &str,
    end_time: &str,
) -> Result<entity::availability::Model, DbErr> {
    let now = Utc::now();
    entity::availability::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        user_id: ActiveValue::Set(user_id),
        day_of_week: ActiveValue::Set(day_of_week),
        start_time: ActiveValue::Set(start_time.to_string()),
        end_time: ActiveValue::Set(end_time.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}
