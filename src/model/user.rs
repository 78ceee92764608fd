use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::model::{api::SortOrder, session::SessionDto, ticket::TicketDto};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Learner,
    Buddy,
    Both,
    Admin,
    Moderator,
    Partner,
    Staff,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learner => "LEARNER",
            Self::Buddy => "BUDDY",
            Self::Both => "BOTH",
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Partner => "PARTNER",
            Self::Staff => "STAFF",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LEARNER" => Some(Self::Learner),
            "BUDDY" => Some(Self::Buddy),
            "BOTH" => Some(Self::Both),
            "ADMIN" => Some(Self::Admin),
            "MODERATOR" => Some(Self::Moderator),
            "PARTNER" => Some(Self::Partner),
            "STAFF" => Some(Self::Staff),
            _ => None,
        }
    }

    /// Whether the role may offer availability, accept bookings and claim tickets.
    pub fn is_buddy(&self) -> bool {
        matches!(self, Self::Buddy | Self::Both)
    }

    /// Whether the role has platform administration access.
    pub fn is_staff(&self) -> bool {
        matches!(
            self,
            Self::Admin | Self::Moderator | Self::Partner | Self::Staff
        )
    }

    /// Roles a user may pick for themselves.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Learner | Self::Buddy | Self::Both)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Full user profile. Never carries password hashes or tokens.
#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
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
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal user reference embedded in sessions, tickets and comments.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCountsDto {
    pub sessions_as_buddy: u64,
    pub sessions_as_learner: u64,
    pub tickets_created: u64,
    pub tickets_claimed: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub counts: UserCountsDto,
}

#[derive(Deserialize, Debug, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Case-insensitive match on name, email, bio, major or school name
    pub search: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
    /// `name`, `email`, `createdAt` or `updatedAt`
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyUserDto {
    pub is_approved: bool,
    #[validate(length(max = 500))]
    pub rejection_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    /// Only `LEARNER`, `BUDDY` or `BOTH`
    pub role: Option<UserRole>,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAccountStatusDto {
    pub status: UserStatus,
}

#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillsDto {
    #[validate(length(min = 1))]
    pub skills: Vec<String>,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressDto {
    #[validate(length(min = 1))]
    pub address_line1: String,
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub country: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVerificationDocumentDto {
    #[validate(length(min = 1))]
    pub document_type: String,
    #[validate(url)]
    pub document_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDocumentDto {
    pub id: Uuid,
    pub document_type: String,
    pub document_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentTicketsDto {
    pub created: Vec<TicketDto>,
    pub claimed: Vec<TicketDto>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSessionsDto {
    pub as_buddy: Vec<SessionDto>,
    pub as_learner: Vec<SessionDto>,
}
