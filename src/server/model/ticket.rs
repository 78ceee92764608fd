//! Ticket and ticket comment domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::{
        api::SortOrder,
        ticket::{
            CreateTicketDto, TicketCommentDto, TicketDetailDto, TicketDto, TicketQuery,
            TicketStatus, UpdateTicketDto,
        },
    },
    server::model::{
        pagination::{PageRequest, DEFAULT_LIMIT},
        user::User,
    },
};

pub const COMMENT_PAGE_LIMIT: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    pub created_by_id: Uuid,
    pub claimed_by_id: Option<Uuid>,
    pub module: String,
    pub topic: String,
    pub description: String,
    pub status: TicketStatus,
    pub preferred_times: Vec<String>,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Converts an entity model. JSON columns that aren't string arrays become empty.
    pub fn from_entity(entity: entity::ticket::Model) -> Self {
        Self {
            id: entity.id,
            created_by_id: entity.created_by_id,
            claimed_by_id: entity.claimed_by_id,
            module: entity.module,
            topic: entity.topic,
            description: entity.description,
            status: TicketStatus::parse(&entity.status).unwrap_or(TicketStatus::Closed),
            preferred_times: serde_json::from_value(entity.preferred_times).unwrap_or_default(),
            attachments: serde_json::from_value(entity.attachments).unwrap_or_default(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_creator(&self, user_id: Uuid) -> bool {
        self.created_by_id == user_id
    }

    pub fn is_claimer(&self, user_id: Uuid) -> bool {
        self.claimed_by_id == Some(user_id)
    }
}

/// A ticket with its creator, claimer and comment count loaded.
#[derive(Debug, Clone)]
pub struct TicketWithUsers {
    pub ticket: Ticket,
    pub created_by: User,
    pub claimed_by: Option<User>,
    pub comment_count: u64,
}

impl TicketWithUsers {
    pub fn into_dto(self) -> TicketDto {
        TicketDto {
            id: self.ticket.id,
            module: self.ticket.module,
            topic: self.ticket.topic,
            description: self.ticket.description,
            status: self.ticket.status,
            preferred_times: self.ticket.preferred_times,
            attachments: self.ticket.attachments,
            created_by: self.created_by.summary(),
            claimed_by: self.claimed_by.as_ref().map(User::summary),
            comment_count: self.comment_count,
            created_at: self.ticket.created_at,
            updated_at: self.ticket.updated_at,
        }
    }
}

/// A ticket with its full comment thread, oldest comment first.
#[derive(Debug, Clone)]
pub struct TicketDetail {
    pub ticket: TicketWithUsers,
    pub comments: Vec<(TicketComment, User)>,
}

impl TicketDetail {
    pub fn into_dto(self) -> TicketDetailDto {
        TicketDetailDto {
            ticket: self.ticket.into_dto(),
            comments: self
                .comments
                .into_iter()
                .map(|(comment, author)| comment.into_dto(&author))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTicketParams {
    pub created_by_id: Uuid,
    pub module: String,
    pub topic: String,
    pub description: String,
    pub preferred_times: Vec<String>,
    pub attachments: Vec<String>,
}

impl CreateTicketParams {
    pub fn from_dto(created_by_id: Uuid, dto: CreateTicketDto) -> Self {
        Self {
            created_by_id,
            module: dto.module,
            topic: dto.topic,
            description: dto.description,
            preferred_times: dto.preferred_times,
            attachments: dto.attachments,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTicketParams {
    pub module: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub preferred_times: Option<Vec<String>>,
    pub attachments: Option<Vec<String>>,
    pub status: Option<TicketStatus>,
}

impl UpdateTicketParams {
    pub fn from_dto(dto: UpdateTicketDto) -> Self {
        Self {
            module: dto.module,
            topic: dto.topic,
            description: dto.description,
            preferred_times: dto.preferred_times,
            attachments: dto.attachments,
            status: dto.status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TicketSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Module,
    Status,
}

impl TicketSortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("updatedAt") => Self::UpdatedAt,
            Some("module") => Self::Module,
            Some("status") => Self::Status,
            _ => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub module: Option<String>,
    pub created_by_id: Option<Uuid>,
    pub claimed_by_id: Option<Uuid>,
    pub search: Option<String>,
    pub sort_by: TicketSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl TicketFilter {
    pub fn from_query(query: TicketQuery) -> Self {
        Self {
            status: query.status,
            module: query.module.filter(|s| !s.trim().is_empty()),
            created_by_id: query.created_by_id,
            claimed_by_id: query.claimed_by_id,
            search: query.search.filter(|s| !s.trim().is_empty()),
            sort_by: TicketSortField::parse(query.sort_by.as_deref()),
            sort_order: query.sort_order.unwrap_or_default(),
            page: PageRequest::new(query.page, query.limit, DEFAULT_LIMIT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketComment {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TicketComment {
    pub fn from_entity(entity: entity::ticket_comment::Model) -> Self {
        Self {
            id: entity.id,
            ticket_id: entity.ticket_id,
            user_id: entity.user_id,
            message: entity.message,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self, author: &User) -> TicketCommentDto {
        TicketCommentDto {
            id: self.id,
            ticket_id: self.ticket_id,
            message: self.message,
            user: author.summary(),
            created_at: self.created_at,
        }
    }
}
