use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        user::{UserDetailDto, UserDto, UserQuery, VerifyUserDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::user::{UserFilter, UserProfile},
        service::admin::AdminService,
        state::AppState,
    },
};

/// Tag for grouping user administration endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "users";

/// List users for staff review.
///
/// An empty page is returned as `200 OK` with an empty list.
///
/// # Access Control
/// - `Staff` - Admin, moderator, partner or staff roles
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `headers` - Request headers carrying the bearer token
/// - `query` - Search, status and role filters, sorting and pagination
///
/// # Returns
/// - `200 OK` - Page of users with their skills
/// - `401 Unauthorized` - Not authenticated
/// - `403 Forbidden` - Caller is not staff
#[utoipa::path(
    get,
    path = "/users",
    tag = ADMIN_TAG,
    params(UserQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<Vec<UserDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Caller is not staff", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Staff])
        .await?;

    let page = AdminService::new(&state.db)
        .list_users(UserFilter::from_query(query))
        .await?;

    let meta = page.meta();
    let users = page
        .items
        .into_iter()
        .map(UserProfile::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(users, meta))))
}

/// Approve or reject a user.
///
/// Approval sets the account `ACTIVE`; rejection sets it `SUSPENDED`.
///
/// # Access Control
/// - `Staff` - Admin, moderator, partner or staff roles
#[utoipa::path(
    patch,
    path = "/users/{id}/verify",
    tag = ADMIN_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = VerifyUserDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User verified or rejected", body = ApiResponse<UserDto>),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn verify_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<VerifyUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Staff])
        .await?;

    payload.validate()?;

    let user = AdminService::new(&state.db).verify_user(id, payload).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(user.into_dto()))))
}

/// Get a user with their session and ticket counts.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = ADMIN_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User with activity counts", body = ApiResponse<UserDetailDto>),
        (status = 403, description = "Caller is not staff", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Staff])
        .await?;

    let user = AdminService::new(&state.db).get_user(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(user.into_dto()))))
}
