//! Ticket repository.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    model::ticket::TicketStatus,
    server::{
        data::{contains_ci, take_user, user_ids_named, users_by_ids},
        model::{
            pagination::Paginated,
            ticket::{
                CreateTicketParams, Ticket, TicketFilter, TicketSortField, TicketWithUsers,
                UpdateTicketParams,
            },
        },
    },
};

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an open, unclaimed ticket.
    pub async fn create(&self, params: CreateTicketParams) -> Result<Ticket, DbErr> {
        let now = Utc::now();
        let entity = entity::ticket::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            created_by_id: ActiveValue::Set(params.created_by_id),
            claimed_by_id: ActiveValue::Set(None),
            module: ActiveValue::Set(params.module),
            topic: ActiveValue::Set(params.topic),
            description: ActiveValue::Set(params.description),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            preferred_times: ActiveValue::Set(serde_json::json!(params.preferred_times)),
            attachments: ActiveValue::Set(serde_json::json!(params.attachments)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Ticket::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Ticket>, DbErr> {
        let entity = entity::prelude::Ticket::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Ticket::from_entity))
    }

    /// Finds a ticket with creator, claimer and comment count loaded.
    pub async fn find_with_users(&self, id: Uuid) -> Result<Option<TicketWithUsers>, DbErr> {
        let Some(ticket) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut loaded = self.attach_users(vec![ticket]).await?;

        Ok(loaded.pop())
    }

    /// Gets tickets matching a filter with users loaded.
    ///
    /// `module` is a case-insensitive substring match. `search` matches module, topic,
    /// description or the creator's or claimer's name case-insensitively.
    pub async fn get_paginated(
        &self,
        filter: &TicketFilter,
    ) -> Result<Paginated<TicketWithUsers>, DbErr> {
        let mut query = entity::prelude::Ticket::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::ticket::Column::Status.eq(status.as_str()));
        }
        if let Some(module) = &filter.module {
            query = query.filter(contains_ci(entity::ticket::Column::Module, module));
        }
        if let Some(created_by_id) = filter.created_by_id {
            query = query.filter(entity::ticket::Column::CreatedById.eq(created_by_id));
        }
        if let Some(claimed_by_id) = filter.claimed_by_id {
            query = query.filter(entity::ticket::Column::ClaimedById.eq(claimed_by_id));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::ticket::Column::Module, search))
                    .add(contains_ci(entity::ticket::Column::Topic, search))
                    .add(contains_ci(entity::ticket::Column::Description, search))
                    .add(entity::ticket::Column::CreatedById.in_subquery(user_ids_named(search)))
                    .add(entity::ticket::Column::ClaimedById.in_subquery(user_ids_named(search))),
            );
        }

        let column = match filter.sort_by {
            TicketSortField::CreatedAt => entity::ticket::Column::CreatedAt,
            TicketSortField::UpdatedAt => entity::ticket::Column::UpdatedAt,
            TicketSortField::Module => entity::ticket::Column::Module,
            TicketSortField::Status => entity::ticket::Column::Status,
        };

        let paginator = query
            .order_by(column, filter.sort_order.into())
            .order_by_asc(entity::ticket::Column::Id)
            .paginate(self.db, filter.page.limit);

        let total = paginator.num_items().await?;
        let tickets = paginator
            .fetch_page(filter.page.index())
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect();

        let items = self.attach_users(tickets).await?;

        Ok(Paginated::new(items, total, filter.page))
    }

    /// Gets a user's most recently created tickets.
    pub async fn get_recent_created(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<TicketWithUsers>, DbErr> {
        let tickets = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::CreatedById.eq(user_id))
            .order_by_desc(entity::ticket::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect();

        self.attach_users(tickets).await
    }

    /// Gets the tickets a user most recently claimed, by last update.
    pub async fn get_recent_claimed(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<TicketWithUsers>, DbErr> {
        let tickets = entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ClaimedById.eq(user_id))
            .order_by_desc(entity::ticket::Column::UpdatedAt)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect();

        self.attach_users(tickets).await
    }

    /// Applies field changes to a ticket. `None` fields are left untouched.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateTicketParams,
    ) -> Result<Option<Ticket>, DbErr> {
        let Some(entity) = entity::prelude::Ticket::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(module) = params.module {
            active.module = ActiveValue::Set(module);
        }
        if let Some(topic) = params.topic {
            active.topic = ActiveValue::Set(topic);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(preferred_times) = params.preferred_times {
            active.preferred_times = ActiveValue::Set(serde_json::json!(preferred_times));
        }
        if let Some(attachments) = params.attachments {
            active.attachments = ActiveValue::Set(serde_json::json!(attachments));
        }
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Ticket::from_entity(active.update(self.db).await?)))
    }

    /// Claims an open ticket for `claimer_id`.
    ///
    /// The update is conditional on the ticket still being `OPEN`, so of two concurrent
    /// claims only one affects a row.
    ///
    /// # Returns
    /// - `Ok(true)` - This call claimed the ticket
    /// - `Ok(false)` - Ticket missing or no longer open
    pub async fn claim(&self, id: Uuid, claimer_id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::update_many()
            .filter(entity::ticket::Column::Id.eq(id))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .col_expr(
                entity::ticket::Column::Status,
                Expr::value(TicketStatus::Claimed.as_str()),
            )
            .col_expr(entity::ticket::Column::ClaimedById, Expr::value(claimer_id))
            .col_expr(entity::ticket::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes a ticket. Comments are removed by cascade.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Ticket::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Loads creator, claimer and comment count for each ticket, preserving order.
    async fn attach_users(&self, tickets: Vec<Ticket>) -> Result<Vec<TicketWithUsers>, DbErr> {
        let users = users_by_ids(
            self.db,
            tickets
                .iter()
                .flat_map(|t| std::iter::once(t.created_by_id).chain(t.claimed_by_id)),
        )
        .await?;

        let comment_counts = self
            .count_comments(&tickets.iter().map(|t| t.id).collect::<Vec<_>>())
            .await?;

        tickets
            .into_iter()
            .map(|ticket| {
                Ok(TicketWithUsers {
                    created_by: take_user(&users, ticket.created_by_id)?,
                    claimed_by: ticket
                        .claimed_by_id
                        .map(|id| take_user(&users, id))
                        .transpose()?,
                    comment_count: comment_counts.get(&ticket.id).copied().unwrap_or(0),
                    ticket,
                })
            })
            .collect()
    }

    async fn count_comments(&self, ticket_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>, DbErr> {
        if ticket_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ticket_column: Vec<Uuid> = entity::prelude::TicketComment::find()
            .select_only()
            .column(entity::ticket_comment::Column::TicketId)
            .filter(entity::ticket_comment::Column::TicketId.is_in(ticket_ids.to_vec()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for ticket_id in ticket_column {
            *counts.entry(ticket_id).or_default() += 1;
        }

        Ok(counts)
    }
}
