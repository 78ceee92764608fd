//! Notification domain model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::notification::{NotificationDto, NotificationQuery, NotificationType},
    server::model::pagination::PageRequest,
};

pub const NOTIFICATION_PAGE_LIMIT: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Converts an entity model, returning `None` for an unknown type string.
    pub fn from_entity(entity: entity::notification::Model) -> Option<Self> {
        Some(Self {
            id: entity.id,
            user_id: entity.user_id,
            notification_type: NotificationType::parse(&entity.notification_type)?,
            message: entity.message,
            read: entity.read,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            notification_type: self.notification_type,
            message: self.message,
            read: self.read,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationParams {
    pub user_id: Uuid,
    pub notification_type: NotificationType,
    pub message: String,
}

impl CreateNotificationParams {
    pub fn new(user_id: Uuid, notification_type: NotificationType, message: String) -> Self {
        Self {
            user_id,
            notification_type,
            message,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub unread_only: bool,
    pub notification_type: Option<NotificationType>,
    pub page: PageRequest,
}

impl NotificationFilter {
    pub fn from_query(query: NotificationQuery) -> Self {
        Self {
            unread_only: query.unread_only,
            notification_type: query.notification_type,
            page: PageRequest::new(query.page, query.limit, NOTIFICATION_PAGE_LIMIT),
        }
    }
}
