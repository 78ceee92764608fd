//! Verification document repository. Documents are stored as URLs only.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::profile::VerificationDocument;

pub struct DocumentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        document_type: String,
        document_url: String,
    ) -> Result<VerificationDocument, DbErr> {
        let entity = entity::verification_document::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(user_id),
            document_type: ActiveValue::Set(document_type),
            document_url: ActiveValue::Set(document_url),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(VerificationDocument::from_entity(entity))
    }

    /// Gets a user's documents, newest first.
    pub async fn get_for_user(&self, user_id: Uuid) -> Result<Vec<VerificationDocument>, DbErr> {
        let entities = entity::prelude::VerificationDocument::find()
            .filter(entity::verification_document::Column::UserId.eq(user_id))
            .order_by_desc(entity::verification_document::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(VerificationDocument::from_entity)
            .collect())
    }
}
