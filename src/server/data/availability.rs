//! Availability repository for buddy time windows.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::availability::{Availability, AvailabilityWindow};

pub struct AvailabilityRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AvailabilityRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a window for a user.
    ///
    /// Overlap is not checked here; callers use `has_overlap` first.
    pub async fn create(
        &self,
        user_id: Uuid,
        window: AvailabilityWindow,
    ) -> Result<Availability, DbErr> {
        let now = Utc::now();
        let entity = entity::availability::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            day_of_week: ActiveValue::Set(window.day_of_week),
            start_time: ActiveValue::Set(window.start_time),
            end_time: ActiveValue::Set(window.end_time),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Availability::from_entity(entity))
    }

    /// Gets a user's windows ordered by day of week, then start time.
    pub async fn get_for_user(&self, user_id: Uuid) -> Result<Vec<Availability>, DbErr> {
        let entities = entity::prelude::Availability::find()
            .filter(entity::availability::Column::UserId.eq(user_id))
            .order_by_asc(entity::availability::Column::DayOfWeek)
            .order_by_asc(entity::availability::Column::StartTime)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Availability::from_entity).collect())
    }

    /// Gets windows for many users at once, keyed by user ID.
    pub async fn get_for_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Availability>>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::Availability::find()
            .filter(entity::availability::Column::UserId.is_in(user_ids.to_vec()))
            .order_by_asc(entity::availability::Column::DayOfWeek)
            .order_by_asc(entity::availability::Column::StartTime)
            .all(self.db)
            .await?;

        let mut map: HashMap<Uuid, Vec<Availability>> = HashMap::new();
        for entity in entities {
            map.entry(entity.user_id)
                .or_default()
                .push(Availability::from_entity(entity));
        }

        Ok(map)
    }

    /// Finds a window only if it belongs to `user_id`.
    ///
    /// # Returns
    /// - `Ok(Some(Availability))` - Window exists and is owned by the user
    /// - `Ok(None)` - Window missing or owned by someone else
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Availability>, DbErr> {
        let entity = entity::prelude::Availability::find_by_id(id)
            .filter(entity::availability::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Availability::from_entity))
    }

    /// Checks whether any of the user's windows overlaps `window`.
    ///
    /// Overlap is `existing.start < new.end && existing.end > new.start` on the same day.
    ///
    /// # Arguments
    /// - `exclude_id` - Window to ignore, used when updating it in place
    pub async fn has_overlap(
        &self,
        user_id: Uuid,
        window: &AvailabilityWindow,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Availability::find()
            .filter(entity::availability::Column::UserId.eq(user_id))
            .filter(entity::availability::Column::DayOfWeek.eq(window.day_of_week))
            .filter(entity::availability::Column::StartTime.lt(window.end_time.as_str()))
            .filter(entity::availability::Column::EndTime.gt(window.start_time.as_str()));

        if let Some(id) = exclude_id {
            query = query.filter(entity::availability::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Overwrites a window's day and times.
    ///
    /// # Returns
    /// - `Ok(Some(Availability))` - Updated window
    /// - `Ok(None)` - No window with that ID
    pub async fn update(
        &self,
        id: Uuid,
        window: AvailabilityWindow,
    ) -> Result<Option<Availability>, DbErr> {
        let Some(entity) = entity::prelude::Availability::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.day_of_week = ActiveValue::Set(window.day_of_week);
        active.start_time = ActiveValue::Set(window.start_time);
        active.end_time = ActiveValue::Set(window.end_time);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Availability::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a window owned by `user_id`.
    ///
    /// # Returns
    /// - `Ok(true)` - Window deleted
    /// - `Ok(false)` - Window missing or owned by someone else
    pub async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Availability::delete_many()
            .filter(entity::availability::Column::Id.eq(id))
            .filter(entity::availability::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Replaces all of a user's windows in one transaction.
    ///
    /// The windows must already be validated against each other.
    pub async fn replace_all(
        &self,
        user_id: Uuid,
        windows: Vec<AvailabilityWindow>,
    ) -> Result<Vec<Availability>, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::Availability::delete_many()
            .filter(entity::availability::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let now = Utc::now();
        for window in windows {
            entity::availability::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                user_id: ActiveValue::Set(user_id),
                day_of_week: ActiveValue::Set(window.day_of_week),
                start_time: ActiveValue::Set(window.start_time),
                end_time: ActiveValue::Set(window.end_time),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        self.get_for_user(user_id).await
    }
}
