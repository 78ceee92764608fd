use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on a protected route.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token failed signature, format or expiry validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token subject doesn't match a user, or the user's role changed since issue.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(Uuid),

    /// Authenticated user lacks the role required by the route.
    ///
    /// # Fields
    /// - User ID that was denied
    /// - Description of the missing permission, logged only
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(Uuid, String),

    /// Unknown email or wrong password on login.
    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Email not verified.")]
    EmailNotVerified,

    #[error("Account is not active.")]
    AccountNotActive,
}

/// Converts authentication errors into HTTP responses.
///
/// - Token and login failures → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// Token failure details are logged at debug level and replaced with a generic message.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action".to_string(),
            ),
            err @ (Self::InvalidCredentials | Self::EmailNotVerified | Self::AccountNotActive) => {
                (StatusCode::UNAUTHORIZED, err.to_string())
            }
        };

        (
            status,
            Json(ErrorDto::new(
                status.as_u16(),
                message,
                serde_json::json!({}),
            )),
        )
            .into_response()
    }
}
