use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Version string reported in every response's `meta` block.
pub const API_VERSION: &str = "1.0";

/// Pagination block attached to `meta` for list endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    pub version: String,
    /// RFC 3339 timestamp of when the response was produced
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl ApiMeta {
    pub fn now(pagination: Option<PaginationMeta>) -> Self {
        Self {
            version: API_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            pagination,
        }
    }
}

/// Success envelope wrapping every successful payload.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse<T> {
    /// Always `"success"`
    pub status: String,
    pub data: T,
    /// Always `null` on success
    pub error: Option<ErrorBody>,
    pub meta: ApiMeta,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
            error: None,
            meta: ApiMeta::now(None),
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta) -> Self {
        Self {
            status: "success".to_string(),
            data,
            error: None,
            meta: ApiMeta::now(Some(pagination)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ErrorBody {
    /// HTTP status code
    pub code: u16,
    pub message: String,
    /// Field-level validation messages, or an empty object
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
}

/// Error envelope returned by every failing request.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct ErrorDto {
    /// Always `"error"`
    pub status: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    pub error: ErrorBody,
    pub meta: ApiMeta,
}

impl ErrorDto {
    pub fn new(code: u16, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: ErrorBody {
                code,
                message: message.into(),
                details,
            },
            meta: ApiMeta::now(None),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
pub struct CountDto {
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
