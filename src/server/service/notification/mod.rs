//! In-app notifications.
//!
//! Other services call `notify` after their main write has committed. Delivery is
//! best effort, like email, so a failed insert is logged and the request still
//! succeeds.

pub mod message;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::{
        notification::{CreateNotificationParams, Notification, NotificationFilter},
        pagination::Paginated,
    },
};

pub struct NotificationService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores notifications, logging instead of failing on a database error.
    pub async fn notify(&self, notifications: impl IntoIterator<Item = CreateNotificationParams>) {
        let notifications: Vec<CreateNotificationParams> = notifications.into_iter().collect();
        let count = notifications.len();

        if let Err(e) = NotificationRepository::new(self.db)
            .create_many(notifications)
            .await
        {
            tracing::error!("Failed to create {} notifications: {}", count, e);
        }
    }

    /// Gets a page of the user's notifications along with their total unread count.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
    ) -> Result<(Paginated<Notification>, u64), AppError> {
        let repo = NotificationRepository::new(self.db);

        let page = repo.get_paginated(user_id, &filter).await?;
        let unread = repo.count_unread(user_id).await?;

        Ok((page, unread))
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?)
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(())` - Notification marked
    /// - `Err(AppError::NotFound)` - No such notification owned by the user
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    /// Returns the number of notifications that changed.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .delete_owned(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
