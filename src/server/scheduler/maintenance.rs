use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{notification::NotificationRepository, user::UserRepository},
    error::AppError,
    service::session::SessionService,
    state::AppState,
};

const EXPIRE_PENDING_SCHEDULE: &str = "0 */15 * * * *";
const COMPLETE_ONGOING_SCHEDULE: &str = "0 */30 * * * *";
const DAILY_CLEANUP_SCHEDULE: &str = "0 0 0 * * *";

/// Read notifications older than this are deleted by the daily cleanup.
const READ_NOTIFICATION_RETENTION: Duration = Duration::days(30);

/// Counts from one run of the daily cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub notifications_deleted: u64,
    pub reset_tokens_cleared: u64,
}

/// Starts the maintenance scheduler.
///
/// - Every 15 minutes: cancels pending sessions whose date has passed
/// - Every 30 minutes: completes confirmed sessions that started over two hours ago
/// - Daily at midnight UTC: deletes old read notifications and expired reset tokens
///
/// Job failures are logged and never stop the scheduler.
///
/// # Arguments
/// - `state` - Application state; jobs reuse its connection pool and services
pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let expire_job = Job::new_async(EXPIRE_PENDING_SCHEDULE, move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            tracing::debug!("Running expire pending sessions job");

            let service = SessionService::new(&state.db, &state.email, &state.calendar);
            match service.expire_pending().await {
                Ok(count) => tracing::info!("Expired {} pending sessions", count),
                Err(e) => tracing::error!("Error expiring pending sessions: {}", e),
            }
        })
    })?;

    let job_state = state.clone();
    let complete_job = Job::new_async(COMPLETE_ONGOING_SCHEDULE, move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            tracing::debug!("Running complete ongoing sessions job");

            let service = SessionService::new(&state.db, &state.email, &state.calendar);
            match service.complete_ongoing().await {
                Ok(count) => tracing::info!("Completed {} ongoing sessions", count),
                Err(e) => tracing::error!("Error completing ongoing sessions: {}", e),
            }
        })
    })?;

    let job_db = state.db.clone();
    let cleanup_job = Job::new_async(DAILY_CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = job_db.clone();

        Box::pin(async move {
            tracing::info!("Running daily cleanup");

            match daily_cleanup(&db, Utc::now()).await {
                Ok(report) => tracing::info!(
                    "Daily cleanup deleted {} read notifications and cleared {} expired reset tokens",
                    report.notifications_deleted,
                    report.reset_tokens_cleared
                ),
                Err(e) => tracing::error!("Error running daily cleanup: {}", e),
            }
        })
    })?;

    scheduler.add(expire_job).await?;
    scheduler.add(complete_job).await?;
    scheduler.add(cleanup_job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(())
}

/// Deletes read notifications past retention and clears reset tokens that expired
/// before `now`.
pub async fn daily_cleanup(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<CleanupReport, AppError> {
    let notifications_deleted = NotificationRepository::new(db)
        .delete_read_before(now - READ_NOTIFICATION_RETENTION)
        .await?;

    let reset_tokens_cleared = UserRepository::new(db)
        .clear_expired_reset_tokens(now)
        .await?;

    Ok(CleanupReport {
        notifications_deleted,
        reset_tokens_cleared,
    })
}
