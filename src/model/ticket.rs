use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::model::{api::SortOrder, user::UserSummaryDto};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Open,
    Claimed,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Claimed => "CLAIMED",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(Self::Open),
            "CLAIMED" => Some(Self::Claimed),
            "RESOLVED" => Some(Self::Resolved),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: Uuid,
    pub module: String,
    pub topic: String,
    pub description: String,
    pub status: TicketStatus,
    pub preferred_times: Vec<String>,
    pub attachments: Vec<String>,
    pub created_by: UserSummaryDto,
    pub claimed_by: Option<UserSummaryDto>,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailDto {
    #[serde(flatten)]
    pub ticket: TicketDto,
    pub comments: Vec<TicketCommentDto>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketDto {
    #[validate(length(min = 1, max = 200))]
    pub module: String,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[serde(default)]
    pub preferred_times: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketDto {
    #[validate(length(min = 1, max = 200))]
    pub module: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub topic: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    pub preferred_times: Option<Vec<String>>,
    pub attachments: Option<Vec<String>>,
    pub status: Option<TicketStatus>,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TicketQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<TicketStatus>,
    pub module: Option<String>,
    pub created_by_id: Option<Uuid>,
    pub claimed_by_id: Option<Uuid>,
    /// Case-insensitive match on module, topic or description
    pub search: Option<String>,
    /// `createdAt`, `updatedAt`, `module` or `status`
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCommentDto {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub message: String,
    pub user: UserSummaryDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketCommentDto {
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}
