use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto},
        auth::{
            AdminCreateUserDto, ConfirmEmailDto, ConfirmForgotPasswordDto, EmailOnlyDto,
            LoginDto, LoginResponseDto, RegisterDto,
        },
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn message(text: &str) -> Json<ApiResponse<MessageDto>> {
    Json(ApiResponse::success(MessageDto {
        message: text.to_string(),
    }))
}

/// Register a new account.
///
/// Creates an unverified account with the `LEARNER` role unless `BUDDY` or `BOTH` is
/// requested, and emails a six digit verification code.
///
/// # Returns
/// - `201 Created` - Account created, awaiting email confirmation
/// - `400 Bad Request` - Invalid payload or staff role requested
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = AuthService::new(&state.db, &state.jwt, &state.email)
        .register(payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user.into_dto())),
    ))
}

/// Confirm an email address with the emailed code.
///
/// # Returns
/// - `200 OK` - Email verified
/// - `400 Bad Request` - Wrong code, unknown email or already verified
#[utoipa::path(
    post,
    path = "/auth/confirm",
    tag = AUTH_TAG,
    request_body = ConfirmEmailDto,
    responses(
        (status = 200, description = "Email verified", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid verification code", body = ErrorDto)
    ),
)]
pub async fn confirm(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = AuthService::new(&state.db, &state.jwt, &state.email)
        .confirm(&payload.email, &payload.token)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(user.into_dto()))))
}

/// Send a fresh verification code.
#[utoipa::path(
    post,
    path = "/auth/resend-code",
    tag = AUTH_TAG,
    request_body = EmailOnlyDto,
    responses(
        (status = 200, description = "Verification code sent", body = ApiResponse<MessageDto>),
        (status = 400, description = "Email already verified", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn resend_code(
    State(state): State<AppState>,
    Json(payload): Json<EmailOnlyDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    AuthService::new(&state.db, &state.jwt, &state.email)
        .resend_code(&payload.email)
        .await?;

    Ok((StatusCode::OK, message("Verification code sent.")))
}

/// Log in with email and password.
///
/// Returns a signed access token along with a refresh token and the user's profile.
///
/// # Returns
/// - `200 OK` - Logged in
/// - `401 Unauthorized` - Invalid credentials, unverified email or inactive account
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Invalid payload", body = ErrorDto),
        (status = 401, description = "Invalid credentials or account not usable", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session = AuthService::new(&state.db, &state.jwt, &state.email)
        .login(payload)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(session.into_dto()))))
}

/// Start the password reset flow.
///
/// The reset token only travels by email; the response carries a confirmation message.
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = EmailOnlyDto,
    responses(
        (status = 200, description = "Reset email sent", body = ApiResponse<MessageDto>),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<EmailOnlyDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    AuthService::new(&state.db, &state.jwt, &state.email)
        .forgot_password(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        message("Password reset instructions have been sent to your email."),
    ))
}

#[utoipa::path(
    post,
    path = "/auth/confirm-forgot-password",
    tag = AUTH_TAG,
    request_body = ConfirmForgotPasswordDto,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<MessageDto>),
        (status = 400, description = "Invalid or expired reset token", body = ErrorDto)
    ),
)]
pub async fn confirm_forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    AuthService::new(&state.db, &state.jwt, &state.email)
        .confirm_forgot_password(payload)
        .await?;

    Ok((StatusCode::OK, message("Password has been reset.")))
}

/// Create a verified account on someone's behalf.
///
/// # Access Control
/// - `Admin` - Only admins can create accounts directly
///
/// # Returns
/// - `201 Created` - Account created, verified and active
/// - `403 Forbidden` - Caller is not an admin, or `ADMIN` role requested
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/auth/admin/create/user",
    tag = AUTH_TAG,
    request_body = AdminCreateUserDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or ADMIN role requested", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto)
    ),
)]
pub async fn admin_create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AdminCreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Admin])
        .await?;

    payload.validate()?;

    let user = AuthService::new(&state.db, &state.jwt, &state.email)
        .admin_create_user(payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user.into_dto())),
    ))
}
