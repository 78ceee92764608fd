//! Session factory for creating booked sessions.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test sessions between a buddy and a learner.
///
/// Rows are inserted directly, bypassing availability and conflict checks, so tests
/// can set up past or overlapping sessions.
pub struct SessionFactory<'a> {
    db: &'a DatabaseConnection,
    buddy_id: Uuid,
    learner_id: Uuid,
    module: String,
    topic: String,
    date: DateTime<Utc>,
    status: String,
    meeting_link: Option<String>,
}

impl<'a> SessionFactory<'a> {
    /// Creates a new SessionFactory with default values.
    ///
    /// Defaults:
    /// - module: `"Calculus"`, topic: `"Limits"`
    /// - date: one day from now
    /// - status: `"PENDING"`
    pub fn new(db: &'a DatabaseConnection, buddy_id: Uuid, learner_id: Uuid) -> Self {
        Self {
            db,
            buddy_id,
            learner_id,
            module: "Calculus".to_string(),
            topic: "Limits".to_string(),
            date: Utc::now() + Duration::days(1),
            status: "PENDING".to_string(),
            meeting_link: None,
        }
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the status string, e.g. `"CONFIRMED"`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn meeting_link(mut self, link: impl Into<String>) -> Self {
        self.meeting_link = Some(link.into());
        self
    }

    /// Builds and inserts the session entity.
    pub async fn build(self) -> Result<entity::session::Model, DbErr> {
        let now = Utc::now();
        entity::session::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            buddy_id: ActiveValue::Set(self.buddy_id),
            learner_id: ActiveValue::Set(self.learner_id),
            module: ActiveValue::Set(self.module),
            topic: ActiveValue::Set(self.topic),
            date: ActiveValue::Set(self.date),
            status: ActiveValue::Set(self.status),
            meeting_link: ActiveValue::Set(self.meeting_link),
            feedback: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending session one day from now with default values.
pub async fn create_session(
    db: &DatabaseConnection,
    buddy_id: Uuid,
    learner_id: Uuid,
) -> Result<entity::session::Model, DbErr> {
    SessionFactory::new(db, buddy_id, learner_id).build().await
}
