use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, session::SessionFactory, user::UserFactory},
};

use crate::{
    model::api::SortOrder,
    server::{
        data::study_buddy::StudyBuddyRepository,
        model::study_buddy::{BuddyFilter, BuddySortField},
    },
};

mod get_paginated;
