//! User factory for creating test user entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let buddy = UserFactory::new(&db)
///     .role("BUDDY")
///     .skills(["Calculus", "Physics"])
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    status: String,
    email_verified: bool,
    email_verification_token: Option<String>,
    password_reset_token: Option<String>,
    password_reset_expires: Option<DateTime<Utc>>,
    school_name: Option<String>,
    major: Option<String>,
    bio: Option<String>,
    skills: Vec<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - email: `"user{id}@example.com"`
    /// - name: `"User {id}"`
    /// - role: `"LEARNER"`, status: `"ACTIVE"`
    /// - email_verified: `true`
    /// - no skills
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("user{}@example.com", id),
            name: format!("User {}", id),
            password_hash: "not-a-real-hash".to_string(),
            role: "LEARNER".to_string(),
            status: "ACTIVE".to_string(),
            email_verified: true,
            email_verification_token: None,
            password_reset_token: None,
            password_reset_expires: None,
            school_name: None,
            major: None,
            bio: None,
            skills: Vec::new(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the stored password hash. Tests that log in must pass a real bcrypt hash.
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    /// Sets the role string, e.g. `"BUDDY"` or `"ADMIN"`.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the status string, e.g. `"SUSPENDED"`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = email_verified;
        self
    }

    pub fn email_verification_token(mut self, token: impl Into<String>) -> Self {
        self.email_verification_token = Some(token.into());
        self
    }

    /// Sets a password reset token with its expiry.
    pub fn password_reset(mut self, token: impl Into<String>, expires: DateTime<Utc>) -> Self {
        self.password_reset_token = Some(token.into());
        self.password_reset_expires = Some(expires);
        self
    }

    pub fn school_name(mut self, school_name: impl Into<String>) -> Self {
        self.school_name = Some(school_name.into());
        self
    }

    pub fn major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Sets the user's skills. Requires the UserSkill table.
    pub fn skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Builds and inserts the user entity, then its skills.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        let user = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            name: ActiveValue::Set(self.name),
            role: ActiveValue::Set(self.role),
            status: ActiveValue::Set(self.status),
            bio: ActiveValue::Set(self.bio),
            avatar_url: ActiveValue::Set(None),
            school_name: ActiveValue::Set(self.school_name),
            study_year: ActiveValue::Set(None),
            major: ActiveValue::Set(self.major),
            email_verified: ActiveValue::Set(self.email_verified),
            phone_verified: ActiveValue::Set(false),
            email_verification_token: ActiveValue::Set(self.email_verification_token),
            password_reset_token: ActiveValue::Set(self.password_reset_token),
            password_reset_expires: ActiveValue::Set(self.password_reset_expires),
            refresh_token: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        for skill in self.skills {
            entity::user_skill::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                skill: ActiveValue::Set(skill),
            }
            .insert(self.db)
            .await?;
        }

        Ok(user)
    }
}

/// Creates a learner with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an active, verified user with the `BUDDY` role and no skills.
pub async fn create_buddy(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("BUDDY").build().await
}
