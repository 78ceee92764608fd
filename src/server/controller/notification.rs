use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    model::{
        api::{ApiResponse, CountDto, ErrorDto, MessageDto},
        notification::{NotificationListDto, NotificationQuery},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::notification::{Notification, NotificationFilter},
        service::notification::NotificationService,
        state::AppState,
    },
};

/// Tag for grouping notification endpoints in OpenAPI documentation
pub static NOTIFICATION_TAG: &str = "notifications";

/// Get the caller's notifications, newest first, with their unread total.
///
/// # Arguments
/// - `query` - Pagination (20 per page by default), `unreadOnly` and `type` filters
///
/// # Returns
/// - `200 OK` - `{notifications, unreadCount}` with pagination in `meta`
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of notifications", body = ApiResponse<NotificationListDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let (page, unread_count) = NotificationService::new(&state.db)
        .list(user.id, NotificationFilter::from_query(query))
        .await?;

    let meta = page.meta();
    let list = NotificationListDto {
        notifications: page
            .items
            .into_iter()
            .map(Notification::into_dto)
            .collect(),
        unread_count,
    };

    Ok((StatusCode::OK, Json(ApiResponse::paginated(list, meta))))
}

#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Unread notification count", body = ApiResponse<CountDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let count = NotificationService::new(&state.db)
        .unread_count(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(CountDto { count }))))
}

#[utoipa::path(
    patch,
    path = "/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = Uuid, Path, description = "Notification ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Notification marked as read", body = ApiResponse<MessageDto>),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db)
        .mark_read(id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MessageDto {
            message: "Notification marked as read".to_string(),
        })),
    ))
}

/// Mark every notification of the caller as read. Returns how many changed.
#[utoipa::path(
    patch,
    path = "/notifications/mark-all-read",
    tag = NOTIFICATION_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Notifications marked as read", body = ApiResponse<CountDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let count = NotificationService::new(&state.db)
        .mark_all_read(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(CountDto { count }))))
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = Uuid, Path, description = "Notification ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Notification deleted", body = ApiResponse<MessageDto>),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    NotificationService::new(&state.db)
        .delete(id, user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MessageDto {
            message: "Notification deleted".to_string(),
        })),
    ))
}
