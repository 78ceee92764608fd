use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsDto {
    pub total_sessions: u64,
    /// One hour is counted per completed session
    pub total_hours: u64,
    pub sessions_as_buddy: u64,
    pub sessions_as_learner: u64,
    /// Distinct learners in completed sessions as buddy
    pub people_helped: u64,
    /// Distinct buddies in completed sessions as learner
    pub helped_by: u64,
    pub completed_sessions: u64,
    /// Pending plus confirmed sessions
    pub pending_sessions: u64,
    pub total_tickets: u64,
    pub tickets_created: u64,
    pub tickets_claimed: u64,
    pub tickets_resolved: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStatsDto {
    pub total_users: u64,
    pub total_sessions: u64,
    pub total_tickets: u64,
    /// Users with session or ticket activity in the last 30 days
    pub active_users: u64,
    pub completed_sessions: u64,
    /// Completed sessions as a rounded percentage of all sessions
    pub active_session_rate: u64,
}
