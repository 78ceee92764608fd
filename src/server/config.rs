use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_JWT_EXPIRES_IN_DAYS: i64 = 7;
const DEFAULT_EMAIL_FROM: &str = "Study Buddy <noreply@studybuddy.app>";

pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub jwt_expires_in_days: i64,

    /// Emails are logged instead of sent when unset
    pub resend_api_key: Option<String>,
    pub email_from: String,

    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", DEFAULT_PORT)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expires_in_days: parse_or("JWT_EXPIRES_IN_DAYS", DEFAULT_JWT_EXPIRES_IN_DAYS)?,
            resend_api_key: optional("RESEND_API_KEY"),
            email_from: optional("EMAIL_FROM").unwrap_or_else(|| DEFAULT_EMAIL_FROM.to_string()),
            google_client_id: optional("GOOGLE_CLIENT_ID"),
            google_client_secret: optional("GOOGLE_CLIENT_SECRET"),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads a variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}
