use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalendarHealthDto {
    pub configured: bool,
    pub connected: bool,
    /// `healthy` or `not_configured`
    pub status: String,
    pub message: String,
}
