use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, session::SessionFactory, ticket::TicketFactory},
};

use crate::{
    model::session::SessionStatus,
    server::data::stats::{SessionSide, StatsRepository},
};

mod active_user_ids;
mod counts;
