//! HTTP handlers.
//!
//! Each handler authenticates the caller through [`AuthGuard`](crate::server::middleware::auth::AuthGuard)
//! where the route requires it, validates the request body, calls into the service layer and
//! converts the returned domain model into a DTO wrapped in the response envelope.

pub mod admin;
pub mod auth;
pub mod calendar;
pub mod notification;
pub mod session;
pub mod stats;
pub mod study_buddy;
pub mod ticket;
pub mod user;
