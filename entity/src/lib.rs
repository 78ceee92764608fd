//! SeaORM entities for the study buddy schema.
//!
//! One module per table. Enum-like columns (roles, statuses, notification types) are
//! stored as upper-case strings and converted to typed enums in the server's model layer.

pub mod prelude;

pub mod availability;
pub mod notification;
pub mod session;
pub mod ticket;
pub mod ticket_comment;
pub mod user;
pub mod user_address;
pub mod user_skill;
pub mod verification_document;
