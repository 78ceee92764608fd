//! Staff user administration.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::user::{UserStatus, VerifyUserDto},
    server::{
        data::{
            skill::SkillRepository,
            stats::{SessionSide, StatsRepository},
            user::UserRepository,
        },
        error::AppError,
        model::{
            pagination::Paginated,
            user::{UserCounts, UserDetail, UserFilter, UserProfile},
        },
    },
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub struct AdminService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists users matching the filter, each with their skills.
    ///
    /// An empty page is a normal result, not an error.
    pub async fn list_users(&self, filter: UserFilter) -> Result<Paginated<UserProfile>, AppError> {
        let page = UserRepository::new(self.db).get_paginated(&filter).await?;

        let ids: Vec<Uuid> = page.items.iter().map(|u| u.id).collect();
        let mut skills = SkillRepository::new(self.db).get_for_users(&ids).await?;

        Ok(page.map(|user| {
            let user_skills = skills.remove(&user.id).unwrap_or_default();
            UserProfile::new(user, user_skills)
        }))
    }

    /// Approves (`ACTIVE`) or rejects (`SUSPENDED`) a user.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn verify_user(&self, id: Uuid, dto: VerifyUserDto) -> Result<UserProfile, AppError> {
        let status = if dto.is_approved {
            UserStatus::Active
        } else {
            UserStatus::Suspended
        };

        let user = UserRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(user_not_found)?;

        match dto.rejection_reason.as_deref().filter(|_| !dto.is_approved) {
            Some(reason) => tracing::info!("User {} rejected: {}", id, reason),
            None => tracing::info!("User {} set to {}", id, status.as_str()),
        }

        let skills = SkillRepository::new(self.db).get_for_user(id).await?;

        Ok(UserProfile::new(user, skills))
    }

    /// Gets a user with session and ticket counts.
    pub async fn get_user(&self, id: Uuid) -> Result<UserDetail, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(user_not_found)?;
        let skills = SkillRepository::new(self.db).get_for_user(id).await?;

        let stats = StatsRepository::new(self.db);
        let counts = UserCounts {
            sessions_as_buddy: stats.count_sessions(id, SessionSide::Buddy, None).await?,
            sessions_as_learner: stats.count_sessions(id, SessionSide::Learner, None).await?,
            tickets_created: stats.count_tickets_created(id).await?,
            tickets_claimed: stats.count_tickets_claimed(id).await?,
        };

        Ok(UserDetail {
            profile: UserProfile::new(user, skills),
            counts,
        })
    }
}
