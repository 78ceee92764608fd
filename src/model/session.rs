use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::model::{api::SortOrder, user::UserSummaryDto};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Statuses that hold a buddy's time slot.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: Uuid,
    pub module: String,
    pub topic: String,
    pub date: DateTime<Utc>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
    pub feedback: Option<String>,
    pub buddy: UserSummaryDto,
    pub learner: UserSummaryDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionDto {
    pub buddy_id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub module: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    /// RFC 3339 start instant
    pub date: DateTime<Utc>,
    /// Generated when omitted
    #[validate(url)]
    pub meeting_link: Option<String>,
}

#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionDto {
    pub status: Option<SessionStatus>,
    #[validate(length(min = 1, max = 2000))]
    pub feedback: Option<String>,
    pub date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 200))]
    pub module: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub topic: Option<String>,
    #[validate(url)]
    pub meeting_link: Option<String>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SessionQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Case-insensitive match on module or topic
    pub search: Option<String>,
    pub status: Option<SessionStatus>,
    pub module: Option<String>,
    pub buddy_id: Option<Uuid>,
    pub learner_id: Option<Uuid>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// `date`, `createdAt`, `module` or `status`
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Buddy,
    Learner,
    #[default]
    All,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MySessionsQuery {
    pub role: Option<ParticipantRole>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
