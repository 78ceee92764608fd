//! Notification factory for creating in-app notifications.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test notifications.
pub struct NotificationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Uuid,
    notification_type: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl<'a> NotificationFactory<'a> {
    /// Creates a new NotificationFactory with default values.
    ///
    /// Defaults: unread `"SESSION_BOOKED"` notification created now.
    pub fn new(db: &'a DatabaseConnection, user_id: Uuid) -> Self {
        Self {
            db,
            user_id,
            notification_type: "SESSION_BOOKED".to_string(),
            message: "Test notification".to_string(),
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn notification_type(mut self, notification_type: impl Into<String>) -> Self {
        self.notification_type = notification_type.into();
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the notification entity.
    pub async fn build(self) -> Result<entity::notification::Model, DbErr> {
        entity::notification::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(self.user_id),
            notification_type: ActiveValue::Set(self.notification_type),
            message: ActiveValue::Set(self.message),
            read: ActiveValue::Set(self.read),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unread notification with default values.
pub async fn create_notification(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<entity::notification::Model, DbErr> {
    NotificationFactory::new(db, user_id).build().await
}
