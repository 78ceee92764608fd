//! Session domain models, booking constants and query filters.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    model::{
        api::SortOrder,
        session::{ParticipantRole, SessionDto, SessionQuery, SessionStatus},
    },
    server::model::{
        pagination::{PageRequest, DEFAULT_LIMIT},
        user::User,
    },
};

/// How far before a requested start an existing session still blocks the slot.
pub const CONFLICT_WINDOW_BEFORE: Duration = Duration::minutes(30);

/// How far after a requested start an existing session still blocks the slot.
pub const CONFLICT_WINDOW_AFTER: Duration = Duration::minutes(90);

/// Confirmed sessions this far past their start are completed automatically.
pub const AUTO_COMPLETE_AFTER: Duration = Duration::hours(2);

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub buddy_id: Uuid,
    pub learner_id: Uuid,
    pub module: String,
    pub topic: String,
    pub date: DateTime<Utc>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Converts an entity model. Unknown status strings are treated as `CANCELLED`.
    pub fn from_entity(entity: entity::session::Model) -> Self {
        Self {
            id: entity.id,
            buddy_id: entity.buddy_id,
            learner_id: entity.learner_id,
            module: entity.module,
            topic: entity.topic,
            date: entity.date,
            status: SessionStatus::parse(&entity.status).unwrap_or(SessionStatus::Cancelled),
            meeting_link: entity.meeting_link,
            feedback: entity.feedback,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.buddy_id == user_id || self.learner_id == user_id
    }
}

/// A session with both participants loaded.
#[derive(Debug, Clone)]
pub struct SessionWithParticipants {
    pub session: Session,
    pub buddy: User,
    pub learner: User,
}

impl SessionWithParticipants {
    pub fn into_dto(self) -> SessionDto {
        SessionDto {
            id: self.session.id,
            module: self.session.module,
            topic: self.session.topic,
            date: self.session.date,
            status: self.session.status,
            meeting_link: self.session.meeting_link,
            feedback: self.session.feedback,
            buddy: self.buddy.summary(),
            learner: self.learner.summary(),
            created_at: self.session.created_at,
            updated_at: self.session.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub buddy_id: Uuid,
    pub learner_id: Uuid,
    pub module: String,
    pub topic: String,
    pub date: DateTime<Utc>,
    pub meeting_link: String,
}

/// Column changes for a session update. `None` leaves a field untouched.
///
/// A new `date` goes through `SessionRepository::reschedule` instead so the
/// conflict rules run under the buddy lock.
#[derive(Debug, Clone, Default)]
pub struct UpdateSessionParams {
    pub status: Option<SessionStatus>,
    pub feedback: Option<String>,
    pub module: Option<String>,
    pub topic: Option<String>,
    pub meeting_link: Option<String>,
}

impl UpdateSessionParams {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.feedback.is_none()
            && self.module.is_none()
            && self.topic.is_none()
            && self.meeting_link.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionSortField {
    #[default]
    Date,
    CreatedAt,
    Module,
    Status,
}

impl SessionSortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("createdAt") => Self::CreatedAt,
            Some("module") => Self::Module,
            Some("status") => Self::Status,
            _ => Self::Date,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub search: Option<String>,
    pub status: Option<SessionStatus>,
    pub module: Option<String>,
    pub buddy_id: Option<Uuid>,
    pub learner_id: Option<Uuid>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Restricts results to sessions this user takes part in
    pub participant_id: Option<Uuid>,
    pub participant_role: ParticipantRole,
    pub sort_by: SessionSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl SessionFilter {
    pub fn from_query(query: SessionQuery) -> Self {
        Self {
            search: query.search.filter(|s| !s.trim().is_empty()),
            status: query.status,
            module: query.module.filter(|s| !s.trim().is_empty()),
            buddy_id: query.buddy_id,
            learner_id: query.learner_id,
            date_from: query.date_from,
            date_to: query.date_to,
            participant_id: None,
            participant_role: ParticipantRole::All,
            sort_by: SessionSortField::parse(query.sort_by.as_deref()),
            sort_order: query.sort_order.unwrap_or_default(),
            page: PageRequest::new(query.page, query.limit, DEFAULT_LIMIT),
        }
    }

    /// Sessions the user takes part in as `role`, newest first.
    pub fn for_participant(user_id: Uuid, role: ParticipantRole, page: PageRequest) -> Self {
        Self {
            participant_id: Some(user_id),
            participant_role: role,
            page,
            ..Default::default()
        }
    }
}
