use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{
        self,
        helpers::{create_bookable_buddy, create_session_with_participants, future_at_hour},
        session::SessionFactory,
    },
};

use crate::{
    model::session::{CreateSessionDto, SessionStatus, UpdateSessionDto},
    server::{
        error::AppError,
        service::{calendar::CalendarService, email::EmailService, session::SessionService},
    },
};

use super::{caller, count_notifications};

mod cancel;
mod create;
mod update;

fn booking(buddy_id: uuid::Uuid, date: chrono::DateTime<Utc>) -> CreateSessionDto {
    CreateSessionDto {
        buddy_id,
        module: "Calculus".to_string(),
        topic: "Chain rule".to_string(),
        date,
        meeting_link: None,
    }
}
