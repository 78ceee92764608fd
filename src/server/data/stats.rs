//! Aggregate counts for user and platform statistics.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect,
};
use uuid::Uuid;

use crate::model::{session::SessionStatus, ticket::TicketStatus};

/// Which side of a session a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSide {
    Buddy,
    Learner,
}

impl SessionSide {
    fn own_column(self) -> entity::session::Column {
        match self {
            Self::Buddy => entity::session::Column::BuddyId,
            Self::Learner => entity::session::Column::LearnerId,
        }
    }

    fn partner_column(self) -> entity::session::Column {
        match self {
            Self::Buddy => entity::session::Column::LearnerId,
            Self::Learner => entity::session::Column::BuddyId,
        }
    }
}

pub struct StatsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StatsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts a user's sessions on one side, optionally limited to some statuses.
    pub async fn count_sessions(
        &self,
        user_id: Uuid,
        side: SessionSide,
        statuses: Option<&[SessionStatus]>,
    ) -> Result<u64, DbErr> {
        let mut query =
            entity::prelude::Session::find().filter(side.own_column().eq(user_id));

        if let Some(statuses) = statuses {
            query = query.filter(
                entity::session::Column::Status
                    .is_in(statuses.iter().map(|s| s.as_str()).collect::<Vec<_>>()),
            );
        }

        query.count(self.db).await
    }

    /// Counts distinct partners across a user's completed sessions on one side.
    ///
    /// As buddy this is the number of people helped; as learner, the number of
    /// buddies who helped them.
    pub async fn count_distinct_completed_partners(
        &self,
        user_id: Uuid,
        side: SessionSide,
    ) -> Result<u64, DbErr> {
        let partners: Vec<Uuid> = entity::prelude::Session::find()
            .select_only()
            .column(side.partner_column())
            .filter(side.own_column().eq(user_id))
            .filter(entity::session::Column::Status.eq(SessionStatus::Completed.as_str()))
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(partners.into_iter().collect::<HashSet<_>>().len() as u64)
    }

    pub async fn count_tickets_created(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::CreatedById.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count_tickets_claimed(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ClaimedById.eq(user_id))
            .count(self.db)
            .await
    }

    /// Counts resolved or closed tickets the user created or claimed.
    pub async fn count_tickets_resolved(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(
                Condition::any()
                    .add(entity::ticket::Column::CreatedById.eq(user_id))
                    .add(entity::ticket::Column::ClaimedById.eq(user_id)),
            )
            .filter(entity::ticket::Column::Status.is_in([
                TicketStatus::Resolved.as_str(),
                TicketStatus::Closed.as_str(),
            ]))
            .count(self.db)
            .await
    }

    pub async fn count_users(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Counts all sessions, or only those with `status`.
    pub async fn count_all_sessions(&self, status: Option<SessionStatus>) -> Result<u64, DbErr> {
        let mut query = entity::prelude::Session::find();
        if let Some(status) = status {
            query = query.filter(entity::session::Column::Status.eq(status.as_str()));
        }

        query.count(self.db).await
    }

    pub async fn count_all_tickets(&self) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find().count(self.db).await
    }

    /// IDs of users with activity since `since`.
    ///
    /// Activity is a session on either side dated since then, a ticket created since
    /// then, or a claimed ticket updated since then.
    pub async fn active_user_ids(&self, since: DateTime<Utc>) -> Result<HashSet<Uuid>, DbErr> {
        let mut active = HashSet::new();

        let participants: Vec<(Uuid, Uuid)> = entity::prelude::Session::find()
            .select_only()
            .column(entity::session::Column::BuddyId)
            .column(entity::session::Column::LearnerId)
            .filter(entity::session::Column::Date.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        for (buddy_id, learner_id) in participants {
            active.insert(buddy_id);
            active.insert(learner_id);
        }

        let creators: Vec<Uuid> = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::CreatedById)
            .filter(entity::ticket::Column::CreatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        active.extend(creators);

        let claimers: Vec<Option<Uuid>> = entity::prelude::Ticket::find()
            .select_only()
            .column(entity::ticket::Column::ClaimedById)
            .filter(entity::ticket::Column::ClaimedById.is_not_null())
            .filter(entity::ticket::Column::UpdatedAt.gte(since))
            .into_tuple()
            .all(self.db)
            .await?;
        active.extend(claimers.into_iter().flatten());

        Ok(active)
    }
}
