//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. Every field is cheap to clone: `DatabaseConnection` is a pool handle
//! and the services hold their clients behind `Arc`s or plain configuration.

use sea_orm::DatabaseConnection;

use crate::server::service::{auth::jwt::JwtService, calendar::CalendarService, email::EmailService};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,

    /// Signs and verifies access tokens
    pub jwt: JwtService,

    /// Outgoing transactional email
    pub email: EmailService,

    /// Meeting links and calendar status
    pub calendar: CalendarService,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt: JwtService,
        email: EmailService,
        calendar: CalendarService,
    ) -> Self {
        Self {
            db,
            jwt,
            email,
            calendar,
        }
    }
}
