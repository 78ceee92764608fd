//! Buddy directory queries.
//!
//! A listed buddy is an active, email-verified user with a buddy-capable role and at
//! least one availability window. Ticket routing uses a looser definition that only
//! needs the role, active status and a matching skill.

use sea_orm::{
    sea_query::{Query, SelectStatement},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};
use uuid::Uuid;

use crate::{
    model::{
        api::SortOrder,
        user::{UserRole, UserStatus},
    },
    server::{
        data::{contains_ci, lower_in, session::SessionRepository},
        model::{
            pagination::Paginated,
            study_buddy::{BuddyFilter, BuddySortField},
            user::User,
        },
    },
};

const BUDDY_ROLES: [UserRole; 2] = [UserRole::Buddy, UserRole::Both];

fn buddy_role_values() -> Vec<&'static str> {
    BUDDY_ROLES.iter().map(|r| r.as_str()).collect()
}

pub struct StudyBuddyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudyBuddyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets listed buddies matching a filter, each with their completed session count.
    ///
    /// Sorting by completed sessions loads every match and sorts in memory; all other
    /// sort fields paginate in SQL.
    pub async fn get_paginated(
        &self,
        filter: &BuddyFilter,
    ) -> Result<Paginated<(User, u64)>, DbErr> {
        let query = self.filtered(filter);
        let sessions = SessionRepository::new(self.db);

        if filter.sort_by == BuddySortField::CompletedSessions {
            let users: Vec<User> = query
                .order_by_asc(entity::user::Column::Name)
                .all(self.db)
                .await?
                .into_iter()
                .map(User::from_entity)
                .collect();
            let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
            let counts = sessions.count_completed_by_buddies(&ids).await?;

            let mut rows: Vec<(User, u64)> = users
                .into_iter()
                .map(|u| {
                    let completed = counts.get(&u.id).copied().unwrap_or(0);
                    (u, completed)
                })
                .collect();
            // Stable sort keeps name order among ties
            match filter.sort_order {
                SortOrder::Asc => rows.sort_by_key(|(_, completed)| *completed),
                SortOrder::Desc => rows.sort_by(|a, b| b.1.cmp(&a.1)),
            }

            let total = rows.len() as u64;
            let items = rows
                .into_iter()
                .skip(filter.page.offset() as usize)
                .take(filter.page.limit as usize)
                .collect();

            return Ok(Paginated::new(items, total, filter.page));
        }

        let column = match filter.sort_by {
            BuddySortField::Name => entity::user::Column::Name,
            BuddySortField::SchoolName => entity::user::Column::SchoolName,
            _ => entity::user::Column::CreatedAt,
        };

        let paginator = query
            .order_by(column, filter.sort_order.into())
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, filter.page.limit);

        let total = paginator.num_items().await?;
        let users: Vec<User> = paginator
            .fetch_page(filter.page.index())
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect();

        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        let counts = sessions.count_completed_by_buddies(&ids).await?;

        let items = users
            .into_iter()
            .map(|u| {
                let completed = counts.get(&u.id).copied().unwrap_or(0);
                (u, completed)
            })
            .collect();

        Ok(Paginated::new(items, total, filter.page))
    }

    /// Finds a user only if they would appear in the buddy directory.
    pub async fn find_listed(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = self
            .filtered(&BuddyFilter::default())
            .filter(entity::user::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds active buddy-capable users with `skill`, excluding `exclude_id`.
    ///
    /// Used to route a new ticket to people who can help. Ordered by name.
    pub async fn find_with_skill(&self, skill: &str, exclude_id: Uuid) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Role.is_in(buddy_role_values()))
            .filter(entity::user::Column::Status.eq(UserStatus::Active.as_str()))
            .filter(entity::user::Column::Id.ne(exclude_id))
            .filter(entity::user::Column::Id.in_subquery(users_with_skill(skill)))
            .order_by_asc(entity::user::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    fn filtered(&self, filter: &BuddyFilter) -> Select<entity::user::Entity> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::Role.is_in(buddy_role_values()))
            .filter(entity::user::Column::Status.eq(UserStatus::Active.as_str()))
            .filter(entity::user::Column::EmailVerified.eq(true))
            .filter(
                entity::user::Column::Id.in_subquery(
                    Query::select()
                        .column(entity::availability::Column::UserId)
                        .from(entity::availability::Entity)
                        .to_owned(),
                ),
            );

        if let Some(module) = &filter.module {
            query = query.filter(entity::user::Column::Id.in_subquery(users_with_module(module)));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::user::Column::Name, search))
                    .add(contains_ci(entity::user::Column::Bio, search))
                    .add(contains_ci(entity::user::Column::Major, search))
                    .add(contains_ci(entity::user::Column::SchoolName, search))
                    .add(entity::user::Column::Id.in_subquery(users_with_skill_matching(search))),
            );
        }
        if let Some(school_name) = &filter.school_name {
            query = query.filter(contains_ci(entity::user::Column::SchoolName, school_name));
        }
        if let Some(study_year) = &filter.study_year {
            query = query.filter(entity::user::Column::StudyYear.eq(study_year.as_str()));
        }
        if let Some(major) = &filter.major {
            query = query.filter(contains_ci(entity::user::Column::Major, major));
        }

        query
    }
}

fn users_with_skill(skill: &str) -> SelectStatement {
    Query::select()
        .column(entity::user_skill::Column::UserId)
        .from(entity::user_skill::Entity)
        .and_where(entity::user_skill::Column::Skill.eq(skill))
        .to_owned()
}

/// Users with the module itself as a skill, or any single word of it.
fn users_with_module(module: &str) -> SelectStatement {
    let words: Vec<&str> = module.split_whitespace().collect();

    Query::select()
        .column(entity::user_skill::Column::UserId)
        .from(entity::user_skill::Entity)
        .cond_where(
            Condition::any()
                .add(entity::user_skill::Column::Skill.eq(module))
                .add(entity::user_skill::Column::Skill.is_in(words)),
        )
        .to_owned()
}

/// Users with a skill containing the whole search term or equal to one of its words.
fn users_with_skill_matching(search: &str) -> SelectStatement {
    let words: Vec<String> = search.split_whitespace().map(str::to_lowercase).collect();

    Query::select()
        .column(entity::user_skill::Column::UserId)
        .from(entity::user_skill::Entity)
        .cond_where(
            Condition::any()
                .add(contains_ci(entity::user_skill::Column::Skill, search))
                .add(lower_in(entity::user_skill::Column::Skill, words)),
        )
        .to_owned()
}
