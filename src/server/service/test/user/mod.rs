use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, session::SessionFactory, ticket::TicketFactory},
};

use crate::{
    model::user::{CreateAddressDto, UpdateUserDto, UserRole, UserStatus},
    server::{
        error::AppError,
        service::{email::EmailService, user::UserService},
    },
};

use super::caller;

mod activity;
mod skills;
