//! Ticket comment repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::{
    data::{take_user, users_by_ids},
    model::{
        pagination::{PageRequest, Paginated},
        ticket::TicketComment,
        user::User,
    },
};

pub struct TicketCommentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketCommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ticket_id: Uuid,
        user_id: Uuid,
        message: String,
    ) -> Result<TicketComment, DbErr> {
        let entity = entity::ticket_comment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            ticket_id: ActiveValue::Set(ticket_id),
            user_id: ActiveValue::Set(user_id),
            message: ActiveValue::Set(message),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(TicketComment::from_entity(entity))
    }

    /// Gets every comment on a ticket with its author, oldest first.
    pub async fn get_all_for_ticket(
        &self,
        ticket_id: Uuid,
    ) -> Result<Vec<(TicketComment, User)>, DbErr> {
        let comments = entity::prelude::TicketComment::find()
            .filter(entity::ticket_comment::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_comment::Column::CreatedAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(TicketComment::from_entity)
            .collect();

        self.attach_authors(comments).await
    }

    /// Gets one page of a ticket's comments with authors, oldest first.
    pub async fn get_paginated_for_ticket(
        &self,
        ticket_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<(TicketComment, User)>, DbErr> {
        let paginator = entity::prelude::TicketComment::find()
            .filter(entity::ticket_comment::Column::TicketId.eq(ticket_id))
            .order_by_asc(entity::ticket_comment::Column::CreatedAt)
            .order_by_asc(entity::ticket_comment::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let comments = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(TicketComment::from_entity)
            .collect();

        let items = self.attach_authors(comments).await?;

        Ok(Paginated::new(items, total, page))
    }

    async fn attach_authors(
        &self,
        comments: Vec<TicketComment>,
    ) -> Result<Vec<(TicketComment, User)>, DbErr> {
        let users = users_by_ids(self.db, comments.iter().map(|c| c.user_id)).await?;

        comments
            .into_iter()
            .map(|comment| {
                let author = take_user(&users, comment.user_id)?;
                Ok((comment, author))
            })
            .collect()
    }
}
