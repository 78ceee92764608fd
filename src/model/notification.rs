use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    SessionBooked,
    SessionUpdated,
    TicketRaised,
    TicketClaimed,
    TicketComment,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionBooked => "SESSION_BOOKED",
            Self::SessionUpdated => "SESSION_UPDATED",
            Self::TicketRaised => "TICKET_RAISED",
            Self::TicketClaimed => "TICKET_CLAIMED",
            Self::TicketComment => "TICKET_COMMENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SESSION_BOOKED" => Some(Self::SessionBooked),
            "SESSION_UPDATED" => Some(Self::SessionUpdated),
            "TICKET_RAISED" => Some(Self::TicketRaised),
            "TICKET_CLAIMED" => Some(Self::TicketClaimed),
            "TICKET_COMMENT" => Some(Self::TicketComment),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListDto {
    pub notifications: Vec<NotificationDto>,
    pub unread_count: u64,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    pub page: Option<u64>,
    /// Defaults to 20
    pub limit: Option<u64>,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
}
