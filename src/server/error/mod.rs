//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error for services and controllers. It wraps the
//! domain-specific errors and implements `IntoResponse`, rendering every failure as the
//! standard error envelope.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Top-level application error type.
///
/// Infrastructure failures (`DbErr`, `ReqwestErr`, ...) become 500 responses with a
/// generic message. The domain variants carry a client-facing message and map to the
/// matching 4xx status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Password hashing failure.
    #[error(transparent)]
    BcryptErr(#[from] bcrypt::BcryptError),

    /// Token signing failure. Verification failures use `AuthError::InvalidToken`.
    #[error(transparent)]
    JwtErr(#[from] jsonwebtoken::errors::Error),

    /// A blocking task (password hashing) panicked or was cancelled.
    #[error(transparent)]
    JoinErr(#[from] tokio::task::JoinError),

    /// Failed to bind or serve the HTTP listener.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Request body failed field validation.
    ///
    /// Results in 400 Bad Request with per-field messages in `details`.
    #[error(transparent)]
    Validation(#[from] validator::ValidationErrors),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Caller is authenticated but not allowed to touch the resource.
    ///
    /// Results in 403 Forbidden with the provided error message.
    #[error("{0}")]
    Forbidden(String),

    /// Request conflicts with existing state (duplicate email, overlapping slot).
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// The message is logged; the client receives a generic one.
    #[error("{0}")]
    InternalError(String),
}

fn envelope(status: StatusCode, message: String, details: serde_json::Value) -> Response {
    (
        status,
        Json(ErrorDto::new(status.as_u16(), message, details)),
    )
        .into_response()
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` and `Validation`
/// - 403 Forbidden - For `Forbidden`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 500 Internal Server Error - For all infrastructure errors
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::Validation(errors) => envelope(
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                serde_json::to_value(&errors).unwrap_or_default(),
            ),
            Self::NotFound(msg) => envelope(StatusCode::NOT_FOUND, msg, serde_json::json!({})),
            Self::BadRequest(msg) => envelope(StatusCode::BAD_REQUEST, msg, serde_json::json!({})),
            Self::Forbidden(msg) => envelope(StatusCode::FORBIDDEN, msg, serde_json::json!({})),
            Self::Conflict(msg) => envelope(StatusCode::CONFLICT, msg, serde_json::json!({})),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                envelope(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    serde_json::json!({}),
                )
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and returns a generic message so implementation details don't leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        envelope(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            serde_json::json!({}),
        )
    }
}
