//! Request and response DTOs for the HTTP API.
//!
//! Everything here is serialized with camelCase keys and documented through utoipa
//! schemas. Server-side domain models live in `server::model` and convert into these
//! types at the controller boundary.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod notification;
pub mod session;
pub mod stats;
pub mod study_buddy;
pub mod ticket;
pub mod user;
