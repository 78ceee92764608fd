//! Ticket factory for creating help requests.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::factory::helpers::next_id;

/// Factory for creating test tickets.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    created_by_id: Uuid,
    claimed_by_id: Option<Uuid>,
    module: String,
    topic: String,
    description: String,
    status: String,
}

impl<'a> TicketFactory<'a> {
    /// Creates a new TicketFactory with default values.
    ///
    /// Defaults:
    /// - module: `"Calculus"`
    /// - topic: `"Topic {id}"`
    /// - status: `"OPEN"`, unclaimed
    pub fn new(db: &'a DatabaseConnection, created_by_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            created_by_id,
            claimed_by_id: None,
            module: "Calculus".to_string(),
            topic: format!("Topic {}", id),
            description: "Need help understanding this".to_string(),
            status: "OPEN".to_string(),
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

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Marks the ticket as claimed by `user_id` and sets status to `"CLAIMED"`.
    pub fn claimed_by(mut self, user_id: Uuid) -> Self {
        self.claimed_by_id = Some(user_id);
        self.status = "CLAIMED".to_string();
        self
    }

    /// Builds and inserts the ticket entity.
    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now();
        entity::ticket::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            created_by_id: ActiveValue::Set(self.created_by_id),
            claimed_by_id: ActiveValue::Set(self.claimed_by_id),
            module: ActiveValue::Set(self.module),
            topic: ActiveValue::Set(self.topic),
            description: ActiveValue::Set(self.description),
            status: ActiveValue::Set(self.status),
            preferred_times: ActiveValue::Set(serde_json::json!([])),
            attachments: ActiveValue::Set(serde_json::json!([])),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket with default values.
pub async fn create_ticket(
    db: &DatabaseConnection,
    created_by_id: Uuid,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, created_by_id).build().await
}
