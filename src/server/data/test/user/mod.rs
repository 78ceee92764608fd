use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::{self, user::UserFactory}};

use crate::{
    model::user::{UserRole, UserStatus},
    server::{
        data::user::UserRepository,
        model::user::{CreateUserParams, UpdateUserParams, UserFilter, UserSortField},
    },
};
