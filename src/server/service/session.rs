//! Session booking and lifecycle.
//!
//! Booking validates the request, then hands the availability match and the
//! double-booking check to `SessionRepository::book`, which runs both under a row lock
//! on the buddy. Status changes follow `SessionStatus::can_transition_to`.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::{
        session::{CreateSessionDto, ParticipantRole, SessionStatus, UpdateSessionDto},
        user::UserStatus,
    },
    server::{
        data::{session::SessionRepository, user::UserRepository},
        error::AppError,
        model::{
            pagination::{PageRequest, Paginated},
            session::{
                CreateSessionParams, Session, SessionFilter, SessionWithParticipants,
                UpdateSessionParams, AUTO_COMPLETE_AFTER,
            },
            user::User,
        },
        service::{
            calendar::CalendarService,
            email::{template, EmailMessage, EmailService},
            notification::{message, NotificationService},
        },
    },
};

fn not_found() -> AppError {
    AppError::NotFound("Session not found or unauthorized".to_string())
}

fn unavailable() -> AppError {
    AppError::Conflict("Study buddy is not available at this time".to_string())
}

pub struct SessionService<'a> {
    pub db: &'a DatabaseConnection,
    pub email: &'a EmailService,
    pub calendar: &'a CalendarService,
}

impl<'a> SessionService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        email: &'a EmailService,
        calendar: &'a CalendarService,
    ) -> Self {
        Self {
            db,
            email,
            calendar,
        }
    }

    /// Books a pending session between the calling learner and a buddy.
    ///
    /// Generates a meeting link when none is given. Both participants get an email and
    /// a `SESSION_BOOKED` notification.
    ///
    /// # Returns
    /// - `Ok(SessionWithParticipants)` - The booked session
    /// - `Err(AppError::BadRequest)` - Date not in the future, or booking oneself
    /// - `Err(AppError::NotFound)` - Buddy missing, not buddy-capable, or not active
    /// - `Err(AppError::Conflict)` - Outside the buddy's availability or already booked
    pub async fn create(
        &self,
        learner: &User,
        dto: CreateSessionDto,
    ) -> Result<SessionWithParticipants, AppError> {
        if dto.date <= Utc::now() {
            return Err(AppError::BadRequest(
                "Session date must be in the future".to_string(),
            ));
        }

        let buddy = UserRepository::new(self.db)
            .find_by_id(dto.buddy_id)
            .await?
            .filter(|b| b.role.is_buddy() && b.status == UserStatus::Active)
            .ok_or_else(|| {
                AppError::NotFound("Study buddy not found or not available".to_string())
            })?;

        if buddy.id == learner.id {
            return Err(AppError::BadRequest(
                "You cannot book a session with yourself".to_string(),
            ));
        }

        let meeting_link = dto
            .meeting_link
            .unwrap_or_else(|| self.calendar.meeting_link());

        let session = SessionRepository::new(self.db)
            .book(CreateSessionParams {
                buddy_id: buddy.id,
                learner_id: learner.id,
                module: dto.module,
                topic: dto.topic,
                date: dto.date,
                meeting_link,
            })
            .await?
            .ok_or_else(unavailable)?;

        tracing::info!(
            "Booked session {} with buddy {} for learner {} at {}",
            session.id,
            buddy.id,
            learner.id,
            session.date
        );

        let booked = SessionWithParticipants {
            session,
            buddy,
            learner: learner.clone(),
        };
        self.announce_booking(&booked).await;

        Ok(booked)
    }

    /// Gets the caller's sessions as buddy, learner or either, newest first.
    pub async fn my_sessions(
        &self,
        user_id: Uuid,
        role: ParticipantRole,
        page: PageRequest,
    ) -> Result<Paginated<SessionWithParticipants>, AppError> {
        let filter = SessionFilter::for_participant(user_id, role, page);

        Ok(SessionRepository::new(self.db)
            .get_paginated(&filter)
            .await?)
    }

    /// Lists sessions matching the filter. Non-staff callers only see their own.
    pub async fn list(
        &self,
        caller: &User,
        mut filter: SessionFilter,
    ) -> Result<Paginated<SessionWithParticipants>, AppError> {
        if !caller.role.is_staff() {
            filter.participant_id = Some(caller.id);
            filter.participant_role = ParticipantRole::All;
        }

        Ok(SessionRepository::new(self.db)
            .get_paginated(&filter)
            .await?)
    }

    /// Gets a session visible to the caller: participants and staff.
    pub async fn get(&self, caller: &User, id: Uuid) -> Result<SessionWithParticipants, AppError> {
        let session = SessionRepository::new(self.db)
            .find_with_participants(id)
            .await?
            .ok_or_else(not_found)?;

        if !session.session.is_participant(caller.id) && !caller.role.is_staff() {
            return Err(not_found());
        }

        Ok(session)
    }

    /// Applies a participant's changes to a session.
    ///
    /// Only the buddy may confirm. Feedback requires the resulting status to be
    /// `COMPLETED`. Date, module, topic and link are editable while `PENDING`, and a new
    /// date goes through the booking rules again.
    ///
    /// # Returns
    /// - `Ok(SessionWithParticipants)` - Updated session
    /// - `Err(AppError::NotFound)` - Session missing or caller not a participant
    /// - `Err(AppError::Forbidden)` - Learner tried to confirm
    /// - `Err(AppError::BadRequest)` - Invalid transition or edit
    /// - `Err(AppError::Conflict)` - New date not available
    pub async fn update(
        &self,
        caller: &User,
        id: Uuid,
        dto: UpdateSessionDto,
    ) -> Result<SessionWithParticipants, AppError> {
        let session_repo = SessionRepository::new(self.db);
        let session = self.find_as_participant(caller, id).await?;

        if let Some(next) = dto.status {
            if next == SessionStatus::Confirmed && caller.id != session.buddy_id {
                return Err(AppError::Forbidden(
                    "Only the study buddy can confirm a session".to_string(),
                ));
            }

            if !session.status.can_transition_to(next) {
                return Err(AppError::BadRequest(format!(
                    "Cannot change session status from {} to {}",
                    session.status.as_str(),
                    next.as_str()
                )));
            }
        }

        let resulting_status = dto.status.unwrap_or(session.status);
        if dto.feedback.is_some() && resulting_status != SessionStatus::Completed {
            return Err(AppError::BadRequest(
                "Feedback can only be given for completed sessions".to_string(),
            ));
        }

        let edits_details = dto.date.is_some()
            || dto.module.is_some()
            || dto.topic.is_some()
            || dto.meeting_link.is_some();
        if edits_details && session.status != SessionStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending sessions can be edited".to_string(),
            ));
        }

        if let Some(date) = dto.date {
            if date <= Utc::now() {
                return Err(AppError::BadRequest(
                    "Session date must be in the future".to_string(),
                ));
            }

            session_repo
                .reschedule(id, date)
                .await?
                .ok_or_else(unavailable)?;
        }

        let params = UpdateSessionParams {
            status: dto.status,
            feedback: dto.feedback,
            module: dto.module,
            topic: dto.topic,
            meeting_link: dto.meeting_link,
        };
        if !params.is_empty() {
            session_repo.update(id, params).await?.ok_or_else(not_found)?;
        }

        let updated = session_repo
            .find_with_participants(id)
            .await?
            .ok_or_else(not_found)?;

        if dto.status.is_some() {
            tracing::info!(
                "Session {} moved from {} to {} by {}",
                id,
                session.status.as_str(),
                updated.session.status.as_str(),
                caller.id
            );
            self.announce_status(&updated).await;
        }

        Ok(updated)
    }

    /// Cancels a session the caller takes part in.
    ///
    /// # Returns
    /// - `Ok(SessionWithParticipants)` - Cancelled session
    /// - `Err(AppError::NotFound)` - Session missing or caller not a participant
    /// - `Err(AppError::BadRequest)` - Session already completed or cancelled
    pub async fn cancel(
        &self,
        caller: &User,
        id: Uuid,
    ) -> Result<SessionWithParticipants, AppError> {
        let session_repo = SessionRepository::new(self.db);
        let session = self.find_as_participant(caller, id).await?;

        if !session.status.is_active() {
            return Err(AppError::BadRequest(format!(
                "Cannot cancel a session that is {}",
                session.status.as_str()
            )));
        }

        session_repo
            .update(
                id,
                UpdateSessionParams {
                    status: Some(SessionStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(not_found)?;

        let cancelled = session_repo
            .find_with_participants(id)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!("Session {} cancelled by {}", id, caller.id);
        self.announce_status(&cancelled).await;

        Ok(cancelled)
    }

    /// Cancels every pending session whose start has passed.
    pub async fn expire_pending(&self) -> Result<u64, AppError> {
        let count = SessionRepository::new(self.db)
            .expire_pending(Utc::now())
            .await?;

        Ok(count)
    }

    /// Completes every confirmed session that started more than two hours ago.
    pub async fn complete_ongoing(&self) -> Result<u64, AppError> {
        let count = SessionRepository::new(self.db)
            .complete_ongoing(Utc::now() - AUTO_COMPLETE_AFTER)
            .await?;

        Ok(count)
    }

    async fn find_as_participant(&self, caller: &User, id: Uuid) -> Result<Session, AppError> {
        SessionRepository::new(self.db)
            .find_by_id(id)
            .await?
            .filter(|s| s.is_participant(caller.id))
            .ok_or_else(not_found)
    }

    async fn announce_booking(&self, booked: &SessionWithParticipants) {
        let SessionWithParticipants {
            session,
            buddy,
            learner,
        } = booked;
        let date = message::format_date(session.date);

        self.email
            .send_all(vec![
                template::session_requested(
                    &buddy.email,
                    &learner.name,
                    &session.module,
                    &session.topic,
                    &date,
                ),
                template::session_submitted(
                    &learner.email,
                    &buddy.name,
                    &session.module,
                    &session.topic,
                ),
            ])
            .await;

        NotificationService::new(self.db)
            .notify(message::session_booked(
                buddy.id,
                &buddy.name,
                learner.id,
                &learner.name,
                &session.module,
                &session.topic,
                session.date,
            ))
            .await;
    }

    async fn announce_status(&self, updated: &SessionWithParticipants) {
        let SessionWithParticipants {
            session,
            buddy,
            learner,
        } = updated;

        self.email.send_all(status_emails(updated)).await;

        NotificationService::new(self.db)
            .notify(message::session_updated(
                [buddy.id, learner.id],
                session.status,
                &session.module,
                &session.topic,
            ))
            .await;
    }
}

/// Emails for both participants after a status change. Each names the other party.
fn status_emails(updated: &SessionWithParticipants) -> Vec<EmailMessage> {
    let SessionWithParticipants {
        session,
        buddy,
        learner,
    } = updated;
    let date = message::format_date(session.date);
    let link = session.meeting_link.as_deref().unwrap_or_default();

    [(buddy, learner), (learner, buddy)]
        .into_iter()
        .filter_map(|(recipient, partner)| match session.status {
            SessionStatus::Confirmed => Some(template::session_confirmed(
                &recipient.email,
                &partner.name,
                &date,
                link,
            )),
            SessionStatus::Cancelled => Some(template::session_cancelled(
                &recipient.email,
                &partner.name,
                &date,
            )),
            SessionStatus::Completed => {
                Some(template::session_completed(&recipient.email, &partner.name))
            }
            SessionStatus::Pending => None,
        })
        .collect()
}
