use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        user::{
            AddressDto, ChangeAccountStatusDto, CreateAddressDto, CreateVerificationDocumentDto,
            RecentTicketsDto, SkillsDto, UpcomingSessionsDto, UpdateUserDto,
            VerificationDocumentDto, UserDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            profile::VerificationDocument, session::SessionWithParticipants,
            ticket::TicketWithUsers,
        },
        service::user::UserService,
        state::AppState,
    },
};

/// Tag for grouping self-service user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn skills_response(skills: Vec<String>) -> Json<ApiResponse<SkillsDto>> {
    Json(ApiResponse::success(SkillsDto { skills }))
}

/// Get the caller's own profile.
///
/// # Returns
/// - `200 OK` - Caller's profile with skills
/// - `401 Unauthorized` - Missing or invalid token
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's profile", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_own_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db, &state.email)
        .get_profile(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(profile.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db, &state.email)
        .get_profile(id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(profile.into_dto()))))
}

/// Update the caller's own profile.
///
/// `role` may only switch between `LEARNER`, `BUDDY` and `BOTH`.
///
/// # Returns
/// - `200 OK` - Updated profile
/// - `400 Bad Request` - Invalid fields or staff role requested
/// - `403 Forbidden` - Target is not the caller
#[utoipa::path(
    patch,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 403, description = "You can only update your own profile", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let profile = UserService::new(&state.db, &state.email)
        .update_profile(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(profile.into_dto()))))
}

/// Delete the caller's account along with everything it owns.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<MessageDto>),
        (status = 403, description = "You can only delete your own account", body = ErrorDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db, &state.email)
        .delete_account(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MessageDto {
            message: "Account deleted".to_string(),
        })),
    ))
}

#[utoipa::path(
    patch,
    path = "/user/{id}/change-account-status",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = ChangeAccountStatusDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<UserDto>),
        (status = 400, description = "User already has that status", body = ErrorDto),
        (status = 403, description = "You can only change your own account status", body = ErrorDto)
    ),
)]
pub async fn change_account_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeAccountStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db, &state.email)
        .change_status(&user, id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(profile.into_dto()))))
}

#[utoipa::path(
    post,
    path = "/user/verification-documents",
    tag = USER_TAG,
    request_body = CreateVerificationDocumentDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Document registered", body = ApiResponse<VerificationDocumentDto>),
        (status = 400, description = "Invalid document data", body = ErrorDto)
    ),
)]
pub async fn add_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateVerificationDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let document = UserService::new(&state.db, &state.email)
        .add_document(user.id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(document.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/user/user-documents",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's documents", body = ApiResponse<Vec<VerificationDocumentDto>>)
    ),
)]
pub async fn list_documents(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let documents = UserService::new(&state.db, &state.email)
        .documents(user.id)
        .await?
        .into_iter()
        .map(VerificationDocument::into_dto)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::success(documents))))
}

/// Create the caller's address, or overwrite the one they have.
#[utoipa::path(
    post,
    path = "/user/address",
    tag = USER_TAG,
    request_body = CreateAddressDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Address saved", body = ApiResponse<AddressDto>),
        (status = 400, description = "Invalid address", body = ErrorDto)
    ),
)]
pub async fn save_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let address = UserService::new(&state.db, &state.email)
        .save_address(user.id, payload)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(address.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/user/user-address",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's address", body = ApiResponse<AddressDto>),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
)]
pub async fn get_address(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let address = UserService::new(&state.db, &state.email)
        .address(user.id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(address.into_dto()))))
}

/// Get a user's skills, alphabetically.
#[utoipa::path(
    get,
    path = "/user/{id}/skills",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User's skills", body = ApiResponse<SkillsDto>),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let skills = UserService::new(&state.db, &state.email).skills(id).await?;

    Ok((StatusCode::OK, skills_response(skills)))
}

/// Add skills to the caller. Skills they already have are ignored.
#[utoipa::path(
    post,
    path = "/user/me/skills",
    tag = USER_TAG,
    request_body = SkillsDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's skills after the change", body = ApiResponse<SkillsDto>),
        (status = 400, description = "No skills given", body = ErrorDto)
    ),
)]
pub async fn add_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SkillsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let skills = UserService::new(&state.db, &state.email)
        .add_skills(user.id, payload.skills)
        .await?;

    Ok((StatusCode::OK, skills_response(skills)))
}

/// Replace the caller's skill set. Duplicates are dropped.
#[utoipa::path(
    put,
    path = "/user/me/skills",
    tag = USER_TAG,
    request_body = SkillsDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's new skills", body = ApiResponse<SkillsDto>),
        (status = 400, description = "No skills given", body = ErrorDto)
    ),
)]
pub async fn replace_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SkillsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let skills = UserService::new(&state.db, &state.email)
        .replace_skills(user.id, payload.skills)
        .await?;

    Ok((StatusCode::OK, skills_response(skills)))
}

#[utoipa::path(
    delete,
    path = "/user/me/skills",
    tag = USER_TAG,
    request_body = SkillsDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's remaining skills", body = ApiResponse<SkillsDto>),
        (status = 400, description = "No skills given", body = ErrorDto)
    ),
)]
pub async fn remove_skills(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SkillsDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let skills = UserService::new(&state.db, &state.email)
        .remove_skills(user.id, payload.skills)
        .await?;

    Ok((StatusCode::OK, skills_response(skills)))
}

/// Get the caller's ten latest created tickets and ten latest claimed tickets.
#[utoipa::path(
    get,
    path = "/user/me/tickets",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Recent tickets", body = ApiResponse<RecentTicketsDto>)
    ),
)]
pub async fn recent_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let (created, claimed) = UserService::new(&state.db, &state.email)
        .recent_tickets(user.id)
        .await?;

    let tickets = RecentTicketsDto {
        created: created.into_iter().map(TicketWithUsers::into_dto).collect(),
        claimed: claimed.into_iter().map(TicketWithUsers::into_dto).collect(),
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(tickets))))
}

/// Get the caller's next pending or confirmed sessions on each side, soonest first.
#[utoipa::path(
    get,
    path = "/user/me/upcoming-sessions",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Upcoming sessions", body = ApiResponse<UpcomingSessionsDto>)
    ),
)]
pub async fn upcoming_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let (as_buddy, as_learner) = UserService::new(&state.db, &state.email)
        .upcoming_sessions(user.id)
        .await?;

    let sessions = UpcomingSessionsDto {
        as_buddy: as_buddy
            .into_iter()
            .map(SessionWithParticipants::into_dto)
            .collect(),
        as_learner: as_learner
            .into_iter()
            .map(SessionWithParticipants::into_dto)
            .collect(),
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(sessions))))
}
