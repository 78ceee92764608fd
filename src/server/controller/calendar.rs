use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ApiResponse, calendar::CalendarHealthDto},
    server::state::AppState,
};

/// Tag for grouping calendar endpoints in OpenAPI documentation
pub static CALENDAR_TAG: &str = "calendar";

/// Report whether calendar credentials are configured.
#[utoipa::path(
    get,
    path = "/calendar/health",
    tag = CALENDAR_TAG,
    responses(
        (status = 200, description = "Calendar integration status", body = ApiResponse<CalendarHealthDto>)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(state.calendar.health())),
    )
}
