//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and into
//! DTOs at the controller boundary. String-backed enum columns are parsed into their
//! typed enums here so the service layer never handles raw column values.

pub mod availability;
pub mod notification;
pub mod pagination;
pub mod profile;
pub mod session;
pub mod study_buddy;
pub mod ticket;
pub mod user;
