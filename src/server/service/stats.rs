//! Per-user and platform-wide statistics.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::{
        session::SessionStatus,
        stats::{GlobalStatsDto, UserStatsDto},
    },
    server::{
        data::{
            stats::{SessionSide, StatsRepository},
            user::UserRepository,
        },
        error::AppError,
    },
};

/// Window for counting a user as active in the global stats.
const ACTIVE_USER_WINDOW: Duration = Duration::days(30);

pub struct StatsService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> StatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Session and ticket totals for one user.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn user_stats(&self, user_id: Uuid) -> Result<UserStatsDto, AppError> {
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let stats = StatsRepository::new(self.db);
        let completed = [SessionStatus::Completed];
        let upcoming = [SessionStatus::Pending, SessionStatus::Confirmed];

        let mut sessions_as = [0u64; 2];
        let mut completed_as = [0u64; 2];
        let mut upcoming_as = [0u64; 2];
        for (i, side) in [SessionSide::Buddy, SessionSide::Learner].into_iter().enumerate() {
            sessions_as[i] = stats.count_sessions(user_id, side, None).await?;
            completed_as[i] = stats.count_sessions(user_id, side, Some(&completed)).await?;
            upcoming_as[i] = stats.count_sessions(user_id, side, Some(&upcoming)).await?;
        }

        let completed_sessions = completed_as.iter().sum();
        let tickets_created = stats.count_tickets_created(user_id).await?;
        let tickets_claimed = stats.count_tickets_claimed(user_id).await?;

        Ok(UserStatsDto {
            total_sessions: sessions_as.iter().sum(),
            total_hours: completed_sessions,
            sessions_as_buddy: sessions_as[0],
            sessions_as_learner: sessions_as[1],
            people_helped: stats
                .count_distinct_completed_partners(user_id, SessionSide::Buddy)
                .await?,
            helped_by: stats
                .count_distinct_completed_partners(user_id, SessionSide::Learner)
                .await?,
            completed_sessions,
            pending_sessions: upcoming_as.iter().sum(),
            total_tickets: tickets_created + tickets_claimed,
            tickets_created,
            tickets_claimed,
            tickets_resolved: stats.count_tickets_resolved(user_id).await?,
        })
    }

    /// Platform totals and the share of sessions that completed.
    pub async fn global_stats(&self) -> Result<GlobalStatsDto, AppError> {
        let stats = StatsRepository::new(self.db);

        let total_sessions = stats.count_all_sessions(None).await?;
        let completed_sessions = stats
            .count_all_sessions(Some(SessionStatus::Completed))
            .await?;
        let active_users = stats
            .active_user_ids(Utc::now() - ACTIVE_USER_WINDOW)
            .await?
            .len() as u64;

        Ok(GlobalStatsDto {
            total_users: stats.count_users().await?,
            total_sessions,
            total_tickets: stats.count_all_tickets().await?,
            active_users,
            completed_sessions,
            active_session_rate: completion_rate(completed_sessions, total_sessions),
        })
    }
}

/// Rounded percentage of `completed` in `total`, or 0 when there is nothing to count.
fn completion_rate(completed: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }

    (completed as f64 / total as f64 * 100.0).round() as u64
}
