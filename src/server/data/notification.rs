//! Notification repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::{
    notification::{CreateNotificationParams, Notification, NotificationFilter},
    pagination::Paginated,
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts unread notifications in one statement.
    ///
    /// # Returns
    /// - `Ok(())` - All notifications inserted (no-op for an empty list)
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create_many(&self, params: Vec<CreateNotificationParams>) -> Result<(), DbErr> {
        if params.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let models: Vec<_> = params
            .into_iter()
            .map(|p| entity::notification::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                user_id: ActiveValue::Set(p.user_id),
                notification_type: ActiveValue::Set(p.notification_type.as_str().to_string()),
                message: ActiveValue::Set(p.message),
                read: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
            })
            .collect();

        entity::prelude::Notification::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    /// Gets a user's notifications, newest first.
    pub async fn get_paginated(
        &self,
        user_id: Uuid,
        filter: &NotificationFilter,
    ) -> Result<Paginated<Notification>, DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));

        if filter.unread_only {
            query = query.filter(entity::notification::Column::Read.eq(false));
        }
        if let Some(notification_type) = filter.notification_type {
            query = query.filter(
                entity::notification::Column::NotificationType.eq(notification_type.as_str()),
            );
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_asc(entity::notification::Column::Id)
            .paginate(self.db, filter.page.limit);

        let total = paginator.num_items().await?;
        let notifications = paginator
            .fetch_page(filter.page.index())
            .await?
            .into_iter()
            .filter_map(Notification::from_entity)
            .collect();

        Ok(Paginated::new(notifications, total, filter.page))
    }

    pub async fn count_unread(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications as read.
    ///
    /// # Returns
    /// - `Ok(true)` - Notification exists and belongs to the user
    /// - `Ok(false)` - Notification missing or owned by someone else
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let owned = entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .count(self.db)
            .await?
            > 0;

        if owned {
            entity::prelude::Notification::update_many()
                .filter(entity::notification::Column::Id.eq(id))
                .col_expr(entity::notification::Column::Read, Expr::value(true))
                .exec(self.db)
                .await?;
        }

        Ok(owned)
    }

    /// Marks all of a user's unread notifications as read.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications that changed
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::Read.eq(false))
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes one of the user's notifications.
    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes read notifications created before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of notifications deleted
    pub async fn delete_read_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Read.eq(true))
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
