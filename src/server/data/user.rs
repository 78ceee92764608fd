//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records: account creation,
//! credential and token updates, profile edits and the staff listing with search and
//! sorting. Entity models are converted into `User` domain models at this boundary.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    model::user::UserStatus,
    server::{
        data::contains_ci,
        model::{
            pagination::Paginated,
            user::{CreateUserParams, UpdateUserParams, User, UserFilter, UserSortField},
        },
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active user.
    ///
    /// The email is stored exactly as given; callers lower-case it first.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violation on email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            name: ActiveValue::Set(params.name),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            status: ActiveValue::Set(UserStatus::Active.as_str().to_string()),
            bio: ActiveValue::Set(None),
            avatar_url: ActiveValue::Set(None),
            school_name: ActiveValue::Set(None),
            study_year: ActiveValue::Set(None),
            major: ActiveValue::Set(None),
            email_verified: ActiveValue::Set(params.email_verified),
            phone_verified: ActiveValue::Set(false),
            email_verification_token: ActiveValue::Set(params.email_verification_token),
            password_reset_token: ActiveValue::Set(None),
            password_reset_expires: ActiveValue::Set(None),
            refresh_token: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email. The lookup is exact; emails are stored lower-case.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Applies profile changes to a user. `None` fields are left untouched.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_profile(
        &self,
        id: Uuid,
        params: UpdateUserParams,
    ) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(bio) = params.bio {
            active.bio = ActiveValue::Set(Some(bio));
        }
        if let Some(avatar_url) = params.avatar_url {
            active.avatar_url = ActiveValue::Set(Some(avatar_url));
        }
        if let Some(school_name) = params.school_name {
            active.school_name = ActiveValue::Set(Some(school_name));
        }
        if let Some(study_year) = params.study_year {
            active.study_year = ActiveValue::Set(Some(study_year));
        }
        if let Some(major) = params.major {
            active.major = ActiveValue::Set(Some(major));
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role.as_str().to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;

        Ok(Some(User::from_entity(updated)))
    }

    /// Sets a user's account status.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that ID
    pub async fn set_status(&self, id: Uuid, status: UserStatus) -> Result<Option<User>, DbErr> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)))
    }

    /// Replaces the pending email verification code.
    pub async fn set_verification_token(&self, id: Uuid, token: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::EmailVerificationToken,
                Expr::value(token.to_string()),
            )
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Marks the email as verified and clears the verification code.
    pub async fn mark_email_verified(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::EmailVerified, Expr::value(true))
            .col_expr(
                entity::user::Column::EmailVerificationToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Stores a password reset token and its expiry.
    pub async fn set_password_reset(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordResetToken,
                Expr::value(token.to_string()),
            )
            .col_expr(entity::user::Column::PasswordResetExpires, Expr::value(expires))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Stores a new password hash and clears the reset and refresh tokens.
    pub async fn reset_password(&self, id: Uuid, password_hash: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                Expr::value(password_hash.to_string()),
            )
            .col_expr(
                entity::user::Column::PasswordResetToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user::Column::PasswordResetExpires,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .col_expr(
                entity::user::Column::RefreshToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_refresh_token(&self, id: Uuid, token: Option<String>) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::RefreshToken, Expr::value(token))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Clears password reset tokens whose expiry has passed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of users whose token was cleared
    pub async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::PasswordResetExpires.lt(now))
            .col_expr(
                entity::user::Column::PasswordResetToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user::Column::PasswordResetExpires,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a user. Related rows are removed by foreign key cascades.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that ID
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets users matching a filter with pagination.
    ///
    /// `search` matches name, email, bio, major or school name case-insensitively.
    ///
    /// # Returns
    /// - `Ok(Paginated<User>)` - Requested page and total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, filter: &UserFilter) -> Result<Paginated<User>, DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::user::Column::Name, search))
                    .add(contains_ci(entity::user::Column::Email, search))
                    .add(contains_ci(entity::user::Column::Bio, search))
                    .add(contains_ci(entity::user::Column::Major, search))
                    .add(contains_ci(entity::user::Column::SchoolName, search)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::user::Column::Status.eq(status.as_str()));
        }
        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }

        let column = match filter.sort_by {
            UserSortField::Name => entity::user::Column::Name,
            UserSortField::Email => entity::user::Column::Email,
            UserSortField::CreatedAt => entity::user::Column::CreatedAt,
            UserSortField::UpdatedAt => entity::user::Column::UpdatedAt,
        };

        let paginator = query
            .order_by(column, filter.sort_order.into())
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, filter.page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(filter.page.index()).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok(Paginated::new(users, total, filter.page))
    }
}
