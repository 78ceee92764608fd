//! User domain model and parameter types.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::{
        api::SortOrder,
        auth::LoginResponseDto,
        user::{
            UpdateUserDto, UserCountsDto, UserDetailDto, UserDto, UserQuery, UserRole,
            UserStatus, UserSummaryDto,
        },
    },
    server::model::pagination::{PageRequest, DEFAULT_LIMIT},
};

/// A user with full data from the database, including credentials.
///
/// Credential fields stay on the server; `into_dto` drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub email_verification_token: Option<String>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model.
    ///
    /// Unknown role or status strings fall back to `LEARNER` / `ACTIVE`.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            role: UserRole::parse(&entity.role).unwrap_or_default(),
            status: UserStatus::parse(&entity.status).unwrap_or_default(),
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            school_name: entity.school_name,
            study_year: entity.study_year,
            major: entity.major,
            email_verified: entity.email_verified,
            phone_verified: entity.phone_verified,
            email_verification_token: entity.email_verification_token,
            password_reset_token: entity.password_reset_token,
            password_reset_expires: entity.password_reset_expires,
            refresh_token: entity.refresh_token,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user to a public DTO, attaching their skills.
    pub fn into_dto(self, skills: Vec<String>) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
            status: self.status,
            bio: self.bio,
            avatar_url: self.avatar_url,
            school_name: self.school_name,
            study_year: self.study_year,
            major: self.major,
            email_verified: self.email_verified,
            phone_verified: self.phone_verified,
            skills,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn summary(&self) -> UserSummaryDto {
        UserSummaryDto {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

/// A user together with their skill set.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    pub skills: Vec<String>,
}

impl UserProfile {
    pub fn new(user: User, skills: Vec<String>) -> Self {
        Self { user, skills }
    }

    pub fn into_dto(self) -> UserDto {
        self.user.into_dto(self.skills)
    }
}

/// Participation totals shown to staff on a user's detail page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub sessions_as_buddy: u64,
    pub sessions_as_learner: u64,
    pub tickets_created: u64,
    pub tickets_claimed: u64,
}

#[derive(Debug, Clone)]
pub struct UserDetail {
    pub profile: UserProfile,
    pub counts: UserCounts,
}

impl UserDetail {
    pub fn into_dto(self) -> UserDetailDto {
        UserDetailDto {
            user: self.profile.into_dto(),
            counts: UserCountsDto {
                sessions_as_buddy: self.counts.sessions_as_buddy,
                sessions_as_learner: self.counts.sessions_as_learner,
                tickets_created: self.counts.tickets_created,
                tickets_claimed: self.counts.tickets_claimed,
            },
        }
    }
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub profile: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl LoginSession {
    pub fn into_dto(self) -> LoginResponseDto {
        LoginResponseDto {
            user: self.profile.into_dto(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// Parameters for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
}

/// Profile fields a user may change on themselves. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    pub role: Option<UserRole>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            name: dto.name,
            bio: dto.bio,
            avatar_url: dto.avatar_url,
            school_name: dto.school_name,
            study_year: dto.study_year,
            major: dto.major,
            role: dto.role,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortField {
    Name,
    Email,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl UserSortField {
    /// Parses a `sortBy` query value, falling back to `createdAt`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("name") => Self::Name,
            Some("email") => Self::Email,
            Some("updatedAt") => Self::UpdatedAt,
            _ => Self::CreatedAt,
        }
    }
}

/// Filters for the staff user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    pub sort_by: UserSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl UserFilter {
    pub fn from_query(query: UserQuery) -> Self {
        Self {
            search: query.search.filter(|s| !s.trim().is_empty()),
            status: query.status,
            role: query.role,
            sort_by: UserSortField::parse(query.sort_by.as_deref()),
            sort_order: query.sort_order.unwrap_or_default(),
            page: PageRequest::new(query.page, query.limit, DEFAULT_LIMIT),
        }
    }
}
