//! Help tickets: raising, claiming, commenting and closing.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::ticket::{CreateTicketDto, TicketStatus, UpdateTicketDto},
    server::{
        data::{
            study_buddy::StudyBuddyRepository, ticket::TicketRepository,
            ticket_comment::TicketCommentRepository,
        },
        error::AppError,
        model::{
            pagination::{PageRequest, Paginated},
            ticket::{
                CreateTicketParams, Ticket, TicketComment, TicketDetail, TicketFilter,
                TicketWithUsers, UpdateTicketParams,
            },
            user::User,
        },
        service::{
            email::{template, EmailMessage, EmailService},
            notification::{message, NotificationService},
        },
    },
};

/// Potential buddies beyond this many get an in-app notification but no email.
const MAX_EMAILED_BUDDIES: usize = 10;

fn not_found() -> AppError {
    AppError::NotFound("Ticket not found".to_string())
}

pub struct TicketService<'a> {
    pub db: &'a DatabaseConnection,
    pub email: &'a EmailService,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection, email: &'a EmailService) -> Self {
        Self { db, email }
    }

    /// Raises an open ticket and alerts buddies who list its module as a skill.
    ///
    /// Every matching buddy gets a `TICKET_RAISED` notification; the first ten by name
    /// also get an email.
    pub async fn create(
        &self,
        creator: &User,
        dto: CreateTicketDto,
    ) -> Result<TicketWithUsers, AppError> {
        let ticket = TicketRepository::new(self.db)
            .create(CreateTicketParams::from_dto(creator.id, dto))
            .await?;

        tracing::info!(
            "User {} raised ticket {} for {}",
            creator.id,
            ticket.id,
            ticket.module
        );

        self.alert_potential_buddies(creator, &ticket).await?;

        Ok(TicketWithUsers {
            ticket,
            created_by: creator.clone(),
            claimed_by: None,
            comment_count: 0,
        })
    }

    pub async fn list(&self, filter: TicketFilter) -> Result<Paginated<TicketWithUsers>, AppError> {
        Ok(TicketRepository::new(self.db).get_paginated(&filter).await?)
    }

    /// Lists tickets matching a free-text query on module, topic or description.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Query missing or blank
    pub async fn search(
        &self,
        query: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<TicketWithUsers>, AppError> {
        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            return Err(AppError::BadRequest("Search query is required".to_string()));
        };

        self.list(TicketFilter {
            search: Some(query.trim().to_string()),
            page,
            ..Default::default()
        })
        .await
    }

    pub async fn my_created(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<TicketWithUsers>, AppError> {
        self.list(TicketFilter {
            created_by_id: Some(user_id),
            page,
            ..Default::default()
        })
        .await
    }

    pub async fn my_claimed(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<TicketWithUsers>, AppError> {
        self.list(TicketFilter {
            claimed_by_id: Some(user_id),
            page,
            ..Default::default()
        })
        .await
    }

    /// Gets a ticket with every comment, oldest first.
    pub async fn get(&self, id: Uuid) -> Result<TicketDetail, AppError> {
        let ticket = TicketRepository::new(self.db)
            .find_with_users(id)
            .await?
            .ok_or_else(not_found)?;

        let comments = TicketCommentRepository::new(self.db)
            .get_all_for_ticket(id)
            .await?;

        Ok(TicketDetail { ticket, comments })
    }

    /// Updates a ticket on behalf of its creator, its claimer or staff.
    ///
    /// Moving the ticket to `RESOLVED` or `CLOSED` emails the creator.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Ticket missing
    /// - `Err(AppError::Forbidden)` - Caller is not creator, claimer or staff
    pub async fn update(
        &self,
        caller: &User,
        id: Uuid,
        dto: UpdateTicketDto,
    ) -> Result<TicketWithUsers, AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = repo.find_by_id(id).await?.ok_or_else(not_found)?;

        let allowed =
            ticket.is_creator(caller.id) || ticket.is_claimer(caller.id) || caller.role.is_staff();
        if !allowed {
            return Err(AppError::Forbidden(
                "You are not allowed to update this ticket".to_string(),
            ));
        }

        let previous_status = ticket.status;
        repo.update(id, UpdateTicketParams::from_dto(dto))
            .await?
            .ok_or_else(not_found)?;

        let updated = repo.find_with_users(id).await?.ok_or_else(not_found)?;

        if updated.ticket.status != previous_status {
            tracing::info!(
                "Ticket {} moved from {} to {} by {}",
                id,
                previous_status.as_str(),
                updated.ticket.status.as_str(),
                caller.id
            );

            if let Some(email) = template::ticket_finished(
                &updated.created_by.email,
                updated.ticket.status,
                &updated.ticket.module,
                &updated.ticket.topic,
            ) {
                self.email.send(email).await;
            }
        }

        Ok(updated)
    }

    /// Claims an open ticket for the calling buddy.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Ticket missing
    /// - `Err(AppError::BadRequest)` - Ticket not open, or caller created it
    /// - `Err(AppError::Forbidden)` - Caller is not buddy-capable
    pub async fn claim(&self, caller: &User, id: Uuid) -> Result<TicketWithUsers, AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = repo.find_by_id(id).await?.ok_or_else(not_found)?;
        let not_claimable =
            || AppError::BadRequest("Ticket is not available for claiming".to_string());

        if ticket.status != TicketStatus::Open {
            return Err(not_claimable());
        }

        if ticket.is_creator(caller.id) {
            return Err(AppError::BadRequest(
                "Cannot claim your own ticket".to_string(),
            ));
        }

        if !caller.role.is_buddy() {
            return Err(AppError::Forbidden(
                "Only study buddies can claim tickets".to_string(),
            ));
        }

        // Someone else claimed it between the read and the conditional update.
        if !repo.claim(id, caller.id).await? {
            return Err(not_claimable());
        }

        let claimed = repo.find_with_users(id).await?.ok_or_else(not_found)?;

        tracing::info!("Ticket {} claimed by {}", id, caller.id);

        self.email
            .send(template::ticket_claimed(
                &claimed.created_by.email,
                &caller.name,
                &claimed.ticket.module,
                &claimed.ticket.topic,
            ))
            .await;

        NotificationService::new(self.db)
            .notify([message::ticket_claimed(
                claimed.ticket.created_by_id,
                &caller.name,
                &claimed.ticket.module,
                &claimed.ticket.topic,
            )])
            .await;

        Ok(claimed)
    }

    /// Adds a comment and tells the creator and claimer, never the commenter.
    pub async fn add_comment(
        &self,
        caller: &User,
        id: Uuid,
        text: String,
    ) -> Result<TicketComment, AppError> {
        let ticket = TicketRepository::new(self.db)
            .find_with_users(id)
            .await?
            .ok_or_else(not_found)?;

        let comment = TicketCommentRepository::new(self.db)
            .create(id, caller.id, text)
            .await?;

        let module = &ticket.ticket.module;
        let topic = &ticket.ticket.topic;
        let mut emails = Vec::new();
        let mut notifications = Vec::new();

        if ticket.created_by.id != caller.id {
            emails.push(template::ticket_comment_for_creator(
                &ticket.created_by.email,
                &caller.name,
                module,
                topic,
            ));
            notifications.push(message::ticket_comment(
                ticket.created_by.id,
                &caller.name,
                module,
                topic,
            ));
        }

        if let Some(claimer) = ticket.claimed_by.as_ref().filter(|c| c.id != caller.id) {
            emails.push(template::ticket_comment_for_claimer(
                &claimer.email,
                &caller.name,
                module,
                topic,
            ));
            notifications.push(message::ticket_comment(
                claimer.id,
                &caller.name,
                module,
                topic,
            ));
        }

        self.email.send_all(emails).await;
        NotificationService::new(self.db).notify(notifications).await;

        Ok(comment)
    }

    /// Gets one page of a ticket's comments, oldest first.
    pub async fn list_comments(
        &self,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<(TicketComment, User)>, AppError> {
        TicketRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        Ok(TicketCommentRepository::new(self.db)
            .get_paginated_for_ticket(id, page)
            .await?)
    }

    /// Deletes a ticket on behalf of its creator or staff.
    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        let repo = TicketRepository::new(self.db);
        let ticket = repo.find_by_id(id).await?.ok_or_else(not_found)?;

        if !ticket.is_creator(caller.id) && !caller.role.is_staff() {
            return Err(AppError::Forbidden(
                "You are not allowed to delete this ticket".to_string(),
            ));
        }

        repo.delete(id).await?;

        tracing::info!("Ticket {} deleted by {}", id, caller.id);

        Ok(())
    }

    async fn alert_potential_buddies(
        &self,
        creator: &User,
        ticket: &Ticket,
    ) -> Result<(), AppError> {
        let buddies = StudyBuddyRepository::new(self.db)
            .find_with_skill(&ticket.module, creator.id)
            .await?;

        if buddies.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            "Alerting {} potential buddies about ticket {}",
            buddies.len(),
            ticket.id
        );

        let notifications: Vec<_> = buddies
            .iter()
            .map(|buddy| {
                message::ticket_raised(buddy.id, &creator.name, &ticket.module, &ticket.topic)
            })
            .collect();
        NotificationService::new(self.db).notify(notifications).await;

        let emails: Vec<EmailMessage> = buddies
            .iter()
            .take(MAX_EMAILED_BUDDIES)
            .map(|buddy| {
                template::help_request_available(&buddy.email, &ticket.module, &ticket.topic)
            })
            .collect();
        self.email.send_all(emails).await;

        Ok(())
    }
}
