use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::model::{api::SortOrder, session::SessionDto, user::UserRole};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDto {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 0 = Sunday through 6 = Saturday
    pub day_of_week: i32,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAvailabilityDto {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i32,
    /// `H:MM` or `HH:MM`, 24-hour clock
    pub start_time: String,
    /// `H:MM` or `HH:MM`, 24-hour clock
    pub end_time: String,
}

#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityDto {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAvailabilityDto {
    #[validate(nested)]
    pub availabilities: Vec<CreateAvailabilityDto>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyBuddyDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    pub skills: Vec<String>,
    pub availability: Vec<AvailabilityDto>,
    pub completed_sessions: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyBuddyDetailDto {
    #[serde(flatten)]
    pub buddy: StudyBuddyDto,
    /// Five most recent completed sessions as buddy
    pub recent_sessions: Vec<SessionDto>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StudyBuddyQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Exact skill name
    pub module: Option<String>,
    /// Case-insensitive match on name, bio, major or school name
    pub search: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    /// `name`, `createdAt`, `schoolName` or `completedSessions`
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Search term
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
