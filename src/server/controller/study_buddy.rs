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
        api::{ApiResponse, ErrorDto, MessageDto},
        study_buddy::{
            AvailabilityDto, CreateAvailabilityDto, ReplaceAvailabilityDto, SearchQuery,
            StudyBuddyDetailDto, StudyBuddyDto, StudyBuddyQuery, UpdateAvailabilityDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            availability::Availability,
            pagination::{PageRequest, DEFAULT_LIMIT},
            study_buddy::{BuddyFilter, StudyBuddy},
        },
        service::study_buddy::StudyBuddyService,
        state::AppState,
    },
};

/// Tag for grouping study buddy endpoints in OpenAPI documentation
pub static STUDY_BUDDY_TAG: &str = "study-buddy";

/// List bookable study buddies.
///
/// A buddy is listed when they are active, email-verified, buddy-capable and have published
/// at least one weekly availability window.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `query` - Filters, sorting and pagination
///
/// # Returns
/// - `200 OK` - Page of buddies with skills, availability and completed session counts
#[utoipa::path(
    get,
    path = "/study-buddy",
    tag = STUDY_BUDDY_TAG,
    params(StudyBuddyQuery),
    responses(
        (status = 200, description = "Page of study buddies", body = ApiResponse<Vec<StudyBuddyDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_buddies(
    State(state): State<AppState>,
    Query(query): Query<StudyBuddyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = StudyBuddyService::new(&state.db)
        .list(BuddyFilter::from_query(query))
        .await?;

    let meta = page.meta();
    let buddies = page.items.into_iter().map(StudyBuddy::into_dto).collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(buddies, meta))))
}

/// Search study buddies by name, bio, major or school name.
#[utoipa::path(
    get,
    path = "/study-buddy/search",
    tag = STUDY_BUDDY_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching study buddies", body = ApiResponse<Vec<StudyBuddyDto>>),
        (status = 400, description = "Search query is required", body = ErrorDto)
    ),
)]
pub async fn search_buddies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = StudyBuddyService::new(&state.db)
        .search(query.q, PageRequest::new(query.page, query.limit, DEFAULT_LIMIT))
        .await?;

    let meta = page.meta();
    let buddies = page.items.into_iter().map(StudyBuddy::into_dto).collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(buddies, meta))))
}

/// Get a study buddy with their latest completed sessions.
#[utoipa::path(
    get,
    path = "/study-buddy/{id}",
    tag = STUDY_BUDDY_TAG,
    params(("id" = Uuid, Path, description = "Study buddy ID")),
    responses(
        (status = 200, description = "Study buddy", body = ApiResponse<StudyBuddyDetailDto>),
        (status = 404, description = "Study buddy not found", body = ErrorDto)
    ),
)]
pub async fn get_buddy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let buddy = StudyBuddyService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(buddy.into_dto()))))
}

/// Add a weekly availability window.
///
/// # Access Control
/// - `Buddy` - Caller must have the `BUDDY` or `BOTH` role
///
/// # Returns
/// - `201 Created` - Window stored with normalized `HH:MM` times
/// - `400 Bad Request` - Invalid day or time, or start not before end
/// - `403 Forbidden` - Caller is not a study buddy
/// - `409 Conflict` - Overlaps one of the caller's windows
#[utoipa::path(
    post,
    path = "/study-buddy/availability",
    tag = STUDY_BUDDY_TAG,
    request_body = CreateAvailabilityDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Availability created", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Only study buddies can manage availability", body = ErrorDto),
        (status = 409, description = "Overlapping availability", body = ErrorDto)
    ),
)]
pub async fn add_availability(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAvailabilityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let availability = StudyBuddyService::new(&state.db)
        .add_availability(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(availability.into_dto())),
    ))
}

/// Get the caller's availability, ordered by day then start time.
#[utoipa::path(
    get,
    path = "/study-buddy/me/availability",
    tag = STUDY_BUDDY_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's availability", body = ApiResponse<Vec<AvailabilityDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn my_availability(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let windows = StudyBuddyService::new(&state.db)
        .my_availability(user.id)
        .await?
        .into_iter()
        .map(Availability::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::success(windows))))
}

/// Replace all of the caller's availability in one go.
///
/// # Access Control
/// - `Buddy` - Caller must have the `BUDDY` or `BOTH` role
#[utoipa::path(
    put,
    path = "/study-buddy/me/availability",
    tag = STUDY_BUDDY_TAG,
    request_body = ReplaceAvailabilityDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Availability replaced", body = ApiResponse<Vec<AvailabilityDto>>),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 403, description = "Only study buddies can manage availability", body = ErrorDto),
        (status = 409, description = "Submitted windows overlap", body = ErrorDto)
    ),
)]
pub async fn replace_availability(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReplaceAvailabilityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let windows = StudyBuddyService::new(&state.db)
        .replace_availability(&user, payload)
        .await?
        .into_iter()
        .map(Availability::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::success(windows))))
}

/// Change one of the caller's windows. Unset fields keep their value.
#[utoipa::path(
    patch,
    path = "/study-buddy/availability/{id}",
    tag = STUDY_BUDDY_TAG,
    params(("id" = Uuid, Path, description = "Availability ID")),
    request_body = UpdateAvailabilityDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Availability updated", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Invalid window", body = ErrorDto),
        (status = 404, description = "Availability not found or unauthorized", body = ErrorDto),
        (status = 409, description = "Overlapping availability", body = ErrorDto)
    ),
)]
pub async fn update_availability(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let availability = StudyBuddyService::new(&state.db)
        .update_availability(&user, id, payload)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(availability.into_dto())),
    ))
}

#[utoipa::path(
    delete,
    path = "/study-buddy/availability/{id}",
    tag = STUDY_BUDDY_TAG,
    params(("id" = Uuid, Path, description = "Availability ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Availability deleted", body = ApiResponse<MessageDto>),
        (status = 404, description = "Availability not found or unauthorized", body = ErrorDto)
    ),
)]
pub async fn delete_availability(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    StudyBuddyService::new(&state.db)
        .delete_availability(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MessageDto {
            message: "Availability deleted".to_string(),
        })),
    ))
}
