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
        api::{ApiResponse, CountDto, ErrorDto},
        session::{CreateSessionDto, MySessionsQuery, SessionDto, SessionQuery, UpdateSessionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageRequest, DEFAULT_LIMIT},
            session::{SessionFilter, SessionWithParticipants},
        },
        service::session::SessionService,
        state::AppState,
    },
};

/// Tag for grouping session endpoints in OpenAPI documentation
pub static SESSION_TAG: &str = "sessions";

/// Book a session with a study buddy.
///
/// The requested date must fall inside one of the buddy's weekly availability windows
/// and must not collide with another pending or confirmed session of that buddy
/// (30 minutes before to 90 minutes after). A meeting link is generated when none is given.
///
/// # Access Control
/// - Any authenticated user may book as the learner
///
/// # Returns
/// - `201 Created` - Session booked as `PENDING`
/// - `400 Bad Request` - Date in the past, or booking oneself
/// - `404 Not Found` - Buddy missing or not available
/// - `409 Conflict` - Buddy not available at this time
#[utoipa::path(
    post,
    path = "/sessions",
    tag = SESSION_TAG,
    request_body = CreateSessionDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Session booked", body = ApiResponse<SessionDto>),
        (status = 400, description = "Invalid booking", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Study buddy not found or not available", body = ErrorDto),
        (status = 409, description = "Study buddy is not available at this time", body = ErrorDto)
    ),
)]
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let session = SessionService::new(&state.db, &state.email, &state.calendar)
        .create(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(session.into_dto())),
    ))
}

/// Get the caller's sessions as buddy, learner or either, newest first.
#[utoipa::path(
    get,
    path = "/sessions/my-sessions",
    tag = SESSION_TAG,
    params(MySessionsQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's sessions", body = ApiResponse<Vec<SessionDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn my_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MySessionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = SessionService::new(&state.db, &state.email, &state.calendar)
        .my_sessions(
            user.id,
            query.role.unwrap_or_default(),
            PageRequest::new(query.page, query.limit, DEFAULT_LIMIT),
        )
        .await?;

    let meta = page.meta();
    let sessions = page
        .items
        .into_iter()
        .map(SessionWithParticipants::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(sessions, meta))))
}

/// List sessions.
///
/// Staff see every session; everyone else only sees sessions they take part in.
#[utoipa::path(
    get,
    path = "/sessions",
    tag = SESSION_TAG,
    params(SessionQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of sessions", body = ApiResponse<Vec<SessionDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = SessionService::new(&state.db, &state.email, &state.calendar)
        .list(&user, SessionFilter::from_query(query))
        .await?;

    let meta = page.meta();
    let sessions = page
        .items
        .into_iter()
        .map(SessionWithParticipants::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(sessions, meta))))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    tag = SESSION_TAG,
    params(("id" = Uuid, Path, description = "Session ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session", body = ApiResponse<SessionDto>),
        (status = 404, description = "Session not found or unauthorized", body = ErrorDto)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let session = SessionService::new(&state.db, &state.email, &state.calendar)
        .get(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(session.into_dto()))))
}

/// Update a session's status, feedback or details.
///
/// # Access Control
/// - Participants only; only the buddy may confirm
///
/// # Returns
/// - `200 OK` - Updated session
/// - `400 Bad Request` - Invalid transition, feedback before completion, or details
///   changed after the session left `PENDING`
/// - `403 Forbidden` - Learner tried to confirm
/// - `404 Not Found` - Session missing or caller not a participant
/// - `409 Conflict` - New date not available
#[utoipa::path(
    patch,
    path = "/sessions/{id}",
    tag = SESSION_TAG,
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = UpdateSessionDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session updated", body = ApiResponse<SessionDto>),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 403, description = "Only the study buddy can confirm", body = ErrorDto),
        (status = 404, description = "Session not found or unauthorized", body = ErrorDto),
        (status = 409, description = "Study buddy is not available at this time", body = ErrorDto)
    ),
)]
pub async fn update_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSessionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let session = SessionService::new(&state.db, &state.email, &state.calendar)
        .update(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(session.into_dto()))))
}

/// Cancel a pending or confirmed session.
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = SESSION_TAG,
    params(("id" = Uuid, Path, description = "Session ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Session cancelled", body = ApiResponse<SessionDto>),
        (status = 400, description = "Session already finished", body = ErrorDto),
        (status = 404, description = "Session not found or unauthorized", body = ErrorDto)
    ),
)]
pub async fn cancel_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let session = SessionService::new(&state.db, &state.email, &state.calendar)
        .cancel(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(session.into_dto()))))
}

/// Cancel every pending session whose date has passed.
///
/// Also runs on a schedule; this route triggers it on demand.
///
/// # Access Control
/// - `Staff` - Admin, moderator, partner or staff roles
#[utoipa::path(
    post,
    path = "/sessions/expire-pending",
    tag = SESSION_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Number of sessions cancelled", body = ApiResponse<CountDto>),
        (status = 403, description = "Caller is not staff", body = ErrorDto)
    ),
)]
pub async fn expire_pending(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Staff])
        .await?;

    let count = SessionService::new(&state.db, &state.email, &state.calendar)
        .expire_pending()
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(CountDto { count }))))
}

/// Complete every confirmed session that started over two hours ago.
///
/// # Access Control
/// - `Staff` - Admin, moderator, partner or staff roles
#[utoipa::path(
    post,
    path = "/sessions/complete-ongoing",
    tag = SESSION_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Number of sessions completed", body = ApiResponse<CountDto>),
        (status = 403, description = "Caller is not staff", body = ErrorDto)
    ),
)]
pub async fn complete_ongoing(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Staff])
        .await?;

    let count = SessionService::new(&state.db, &state.email, &state.calendar)
        .complete_ongoing()
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(CountDto { count }))))
}
