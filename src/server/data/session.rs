//! Session repository, including transactional booking.
//!
//! Booking and rescheduling run the availability window match, the double-booking
//! check and the write inside one transaction that first locks the buddy's user row.
//! Concurrent bookings for the same buddy therefore serialize on that lock and cannot
//! both pass the conflict check.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    model::session::{ParticipantRole, SessionStatus},
    server::{
        data::{contains_ci, take_user, user_ids_named, users_by_ids},
        model::{
            pagination::Paginated,
            session::{
                CreateSessionParams, Session, SessionFilter, SessionSortField,
                SessionWithParticipants, UpdateSessionParams, CONFLICT_WINDOW_AFTER,
                CONFLICT_WINDOW_BEFORE,
            },
        },
        util::time::{time_of_day, weekday_index},
    },
};

const ACTIVE_STATUSES: [SessionStatus; 2] = [SessionStatus::Pending, SessionStatus::Confirmed];

fn active_status_values() -> Vec<&'static str> {
    ACTIVE_STATUSES.iter().map(|s| s.as_str()).collect()
}

pub struct SessionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a pending session if the buddy is free at the requested time.
    ///
    /// Locks the buddy row, then checks that some availability window on the weekday
    /// of `params.date` contains its time of day and that no pending or confirmed
    /// session of the buddy starts within 30 minutes before to 90 minutes after it.
    ///
    /// # Returns
    /// - `Ok(Some(Session))` - Slot was free and the session was inserted
    /// - `Ok(None)` - Buddy missing, outside availability, or already booked
    /// - `Err(DbErr)` - Database error; the transaction is rolled back
    pub async fn book(&self, params: CreateSessionParams) -> Result<Option<Session>, DbErr> {
        let txn = self.db.begin().await?;

        if !lock_buddy(&txn, params.buddy_id).await?
            || !slot_is_free(&txn, params.buddy_id, params.date, None).await?
        {
            return Ok(None);
        }

        let now = Utc::now();
        let entity = entity::session::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            buddy_id: ActiveValue::Set(params.buddy_id),
            learner_id: ActiveValue::Set(params.learner_id),
            module: ActiveValue::Set(params.module),
            topic: ActiveValue::Set(params.topic),
            date: ActiveValue::Set(params.date),
            status: ActiveValue::Set(SessionStatus::Pending.as_str().to_string()),
            meeting_link: ActiveValue::Set(Some(params.meeting_link)),
            feedback: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(Some(Session::from_entity(entity)))
    }

    /// Moves a session to a new date under the same rules as `book`.
    ///
    /// The session itself is excluded from the double-booking check.
    ///
    /// # Returns
    /// - `Ok(Some(Session))` - Session moved
    /// - `Ok(None)` - Session missing or new slot unavailable
    pub async fn reschedule(
        &self,
        id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Session>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::Session::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        if !lock_buddy(&txn, entity.buddy_id).await?
            || !slot_is_free(&txn, entity.buddy_id, date, Some(id)).await?
        {
            return Ok(None);
        }

        let mut active = entity.into_active_model();
        active.date = ActiveValue::Set(date);
        active.updated_at = ActiveValue::Set(Utc::now());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        Ok(Some(Session::from_entity(updated)))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DbErr> {
        let entity = entity::prelude::Session::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Session::from_entity))
    }

    /// Finds a session with buddy and learner loaded.
    pub async fn find_with_participants(
        &self,
        id: Uuid,
    ) -> Result<Option<SessionWithParticipants>, DbErr> {
        let Some(session) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut loaded = self.attach_participants(vec![session]).await?;

        Ok(loaded.pop())
    }

    /// Applies column changes to a session.
    ///
    /// Transition rules are enforced by the service; this writes whatever it's given.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateSessionParams,
    ) -> Result<Option<Session>, DbErr> {
        let Some(entity) = entity::prelude::Session::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        if let Some(status) = params.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(feedback) = params.feedback {
            active.feedback = ActiveValue::Set(Some(feedback));
        }
        if let Some(module) = params.module {
            active.module = ActiveValue::Set(module);
        }
        if let Some(topic) = params.topic {
            active.topic = ActiveValue::Set(topic);
        }
        if let Some(meeting_link) = params.meeting_link {
            active.meeting_link = ActiveValue::Set(Some(meeting_link));
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Session::from_entity(active.update(self.db).await?)))
    }

    /// Gets sessions matching a filter with participants loaded.
    ///
    /// # Returns
    /// - `Ok(Paginated<SessionWithParticipants>)` - Requested page and total match count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &SessionFilter,
    ) -> Result<Paginated<SessionWithParticipants>, DbErr> {
        let mut query = entity::prelude::Session::find();

        if let Some(user_id) = filter.participant_id {
            query = query.filter(participant_condition(user_id, filter.participant_role));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(contains_ci(entity::session::Column::Module, search))
                    .add(contains_ci(entity::session::Column::Topic, search))
                    .add(entity::session::Column::BuddyId.in_subquery(user_ids_named(search)))
                    .add(entity::session::Column::LearnerId.in_subquery(user_ids_named(search))),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::session::Column::Status.eq(status.as_str()));
        }
        if let Some(module) = &filter.module {
            query = query.filter(contains_ci(entity::session::Column::Module, module));
        }
        if let Some(buddy_id) = filter.buddy_id {
            query = query.filter(entity::session::Column::BuddyId.eq(buddy_id));
        }
        if let Some(learner_id) = filter.learner_id {
            query = query.filter(entity::session::Column::LearnerId.eq(learner_id));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(entity::session::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(entity::session::Column::Date.lte(to));
        }

        let column = match filter.sort_by {
            SessionSortField::Date => entity::session::Column::Date,
            SessionSortField::CreatedAt => entity::session::Column::CreatedAt,
            SessionSortField::Module => entity::session::Column::Module,
            SessionSortField::Status => entity::session::Column::Status,
        };

        let paginator = query
            .order_by(column, filter.sort_order.into())
            .order_by_asc(entity::session::Column::Id)
            .paginate(self.db, filter.page.limit);

        let total = paginator.num_items().await?;
        let sessions = paginator
            .fetch_page(filter.page.index())
            .await?
            .into_iter()
            .map(Session::from_entity)
            .collect();

        let items = self.attach_participants(sessions).await?;

        Ok(Paginated::new(items, total, filter.page))
    }

    /// Gets up to `limit` pending or confirmed sessions dated at or after `now`,
    /// soonest first.
    pub async fn get_upcoming(
        &self,
        user_id: Uuid,
        role: ParticipantRole,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<SessionWithParticipants>, DbErr> {
        let sessions = entity::prelude::Session::find()
            .filter(participant_condition(user_id, role))
            .filter(entity::session::Column::Status.is_in(active_status_values()))
            .filter(entity::session::Column::Date.gte(now))
            .order_by_asc(entity::session::Column::Date)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Session::from_entity)
            .collect();

        self.attach_participants(sessions).await
    }

    /// Gets a buddy's most recent completed sessions, newest first.
    pub async fn get_recent_completed_as_buddy(
        &self,
        buddy_id: Uuid,
        limit: u64,
    ) -> Result<Vec<SessionWithParticipants>, DbErr> {
        let sessions = entity::prelude::Session::find()
            .filter(entity::session::Column::BuddyId.eq(buddy_id))
            .filter(entity::session::Column::Status.eq(SessionStatus::Completed.as_str()))
            .order_by_desc(entity::session::Column::Date)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(Session::from_entity)
            .collect();

        self.attach_participants(sessions).await
    }

    /// Counts completed sessions per buddy. Buddies with none are absent from the map.
    pub async fn count_completed_by_buddies(
        &self,
        buddy_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, u64>, DbErr> {
        if buddy_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let buddy_column: Vec<Uuid> = entity::prelude::Session::find()
            .select_only()
            .column(entity::session::Column::BuddyId)
            .filter(entity::session::Column::BuddyId.is_in(buddy_ids.to_vec()))
            .filter(entity::session::Column::Status.eq(SessionStatus::Completed.as_str()))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for buddy_id in buddy_column {
            *counts.entry(buddy_id).or_default() += 1;
        }

        Ok(counts)
    }

    /// Cancels every pending session dated before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of sessions cancelled
    pub async fn expire_pending(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        self.transition_before(SessionStatus::Pending, SessionStatus::Cancelled, now)
            .await
    }

    /// Completes every confirmed session dated before `cutoff`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of sessions completed
    pub async fn complete_ongoing(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        self.transition_before(SessionStatus::Confirmed, SessionStatus::Completed, cutoff)
            .await
    }

    async fn transition_before(
        &self,
        from: SessionStatus,
        to: SessionStatus,
        before: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::Session::update_many()
            .filter(entity::session::Column::Status.eq(from.as_str()))
            .filter(entity::session::Column::Date.lt(before))
            .col_expr(entity::session::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::session::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Loads buddy and learner for each session, preserving order.
    async fn attach_participants(
        &self,
        sessions: Vec<Session>,
    ) -> Result<Vec<SessionWithParticipants>, DbErr> {
        let users = users_by_ids(
            self.db,
            sessions.iter().flat_map(|s| [s.buddy_id, s.learner_id]),
        )
        .await?;

        sessions
            .into_iter()
            .map(|session| {
                Ok(SessionWithParticipants {
                    buddy: take_user(&users, session.buddy_id)?,
                    learner: take_user(&users, session.learner_id)?,
                    session,
                })
            })
            .collect()
    }
}

fn participant_condition(user_id: Uuid, role: ParticipantRole) -> Condition {
    match role {
        ParticipantRole::Buddy => {
            Condition::all().add(entity::session::Column::BuddyId.eq(user_id))
        }
        ParticipantRole::Learner => {
            Condition::all().add(entity::session::Column::LearnerId.eq(user_id))
        }
        ParticipantRole::All => Condition::any()
            .add(entity::session::Column::BuddyId.eq(user_id))
            .add(entity::session::Column::LearnerId.eq(user_id)),
    }
}

/// Takes a row lock on the buddy for the rest of the transaction.
///
/// SQLite has no row locks; there the write lock taken by the insert serializes writers.
///
/// # Returns
/// - `Ok(true)` - Buddy exists and is locked
/// - `Ok(false)` - No user with that ID
async fn lock_buddy<C: ConnectionTrait>(conn: &C, buddy_id: Uuid) -> Result<bool, DbErr> {
    let buddy = entity::prelude::User::find_by_id(buddy_id)
        .lock_exclusive()
        .one(conn)
        .await?;

    Ok(buddy.is_some())
}

/// Whether `date` falls inside one of the buddy's windows and clear of other bookings.
async fn slot_is_free<C: ConnectionTrait>(
    conn: &C,
    buddy_id: Uuid,
    date: DateTime<Utc>,
    exclude_session: Option<Uuid>,
) -> Result<bool, DbErr> {
    let time = time_of_day(date);

    let in_window = entity::prelude::Availability::find()
        .filter(entity::availability::Column::UserId.eq(buddy_id))
        .filter(entity::availability::Column::DayOfWeek.eq(weekday_index(date)))
        .filter(entity::availability::Column::StartTime.lte(time.as_str()))
        .filter(entity::availability::Column::EndTime.gt(time.as_str()))
        .count(conn)
        .await?
        > 0;

    if !in_window {
        return Ok(false);
    }

    let mut conflicts = entity::prelude::Session::find()
        .filter(entity::session::Column::BuddyId.eq(buddy_id))
        .filter(entity::session::Column::Status.is_in(active_status_values()))
        .filter(entity::session::Column::Date.gte(date - CONFLICT_WINDOW_BEFORE))
        .filter(entity::session::Column::Date.lte(date + CONFLICT_WINDOW_AFTER));

    if let Some(id) = exclude_session {
        conflicts = conflicts.filter(entity::session::Column::Id.ne(id));
    }

    Ok(conflicts.count(conn).await? == 0)
}
