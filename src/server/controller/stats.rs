use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        stats::{GlobalStatsDto, UserStatsDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::stats::StatsService,
        state::AppState,
    },
};

/// Tag for grouping statistics endpoints in OpenAPI documentation
pub static STATS_TAG: &str = "stats";

/// Get the caller's session and ticket statistics.
#[utoipa::path(
    get,
    path = "/stats/user",
    tag = STATS_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's statistics", body = ApiResponse<UserStatsDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn own_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let stats = StatsService::new(&state.db).user_stats(user.id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(stats))))
}

#[utoipa::path(
    get,
    path = "/stats/user/{id}",
    tag = STATS_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User statistics", body = ApiResponse<UserStatsDto>),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn user_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let stats = StatsService::new(&state.db).user_stats(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(stats))))
}

/// Get platform-wide totals.
///
/// `activeUsers` counts users with session or ticket activity in the last 30 days.
#[utoipa::path(
    get,
    path = "/stats/global",
    tag = STATS_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Platform statistics", body = ApiResponse<GlobalStatsDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn global_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let stats = StatsService::new(&state.db).global_stats().await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(stats))))
}
