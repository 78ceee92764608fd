//! User skill repository.
//!
//! Skills are a set per user stored as `(user_id, skill)` rows. Adding a skill the user
//! already has is a no-op.

use std::collections::{BTreeSet, HashMap, HashSet};

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

pub struct SkillRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SkillRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a user's skills in alphabetical order.
    pub async fn get_for_user(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        let rows = entity::prelude::UserSkill::find()
            .filter(entity::user_skill::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_skill::Column::Skill)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(|r| r.skill).collect())
    }

    /// Gets skills for many users at once, keyed by user ID.
    ///
    /// Users without skills are absent from the map.
    pub async fn get_for_users(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<String>>, DbErr> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = entity::prelude::UserSkill::find()
            .filter(entity::user_skill::Column::UserId.is_in(user_ids.to_vec()))
            .order_by_asc(entity::user_skill::Column::Skill)
            .all(self.db)
            .await?;

        let mut map: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            map.entry(row.user_id).or_default().push(row.skill);
        }

        Ok(map)
    }

    /// Adds skills to a user, ignoring ones they already have.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - The user's full skill set after the insert
    pub async fn add(&self, user_id: Uuid, skills: Vec<String>) -> Result<Vec<String>, DbErr> {
        let skills = dedup(skills);
        if !skills.is_empty() {
            insert_ignoring_duplicates(self.db, user_id, skills).await?;
        }

        self.get_for_user(user_id).await
    }

    /// Replaces a user's skill set in one transaction.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - The new skill set
    pub async fn replace(&self, user_id: Uuid, skills: Vec<String>) -> Result<Vec<String>, DbErr> {
        let skills = dedup(skills);
        let txn = self.db.begin().await?;

        entity::prelude::UserSkill::delete_many()
            .filter(entity::user_skill::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        if !skills.is_empty() {
            insert_ignoring_duplicates(&txn, user_id, skills).await?;
        }

        txn.commit().await?;

        self.get_for_user(user_id).await
    }

    /// Removes the given skills from a user. Skills they don't have are ignored.
    pub async fn remove(&self, user_id: Uuid, skills: Vec<String>) -> Result<Vec<String>, DbErr> {
        let skills = dedup(skills);
        if !skills.is_empty() {
            entity::prelude::UserSkill::delete_many()
                .filter(entity::user_skill::Column::UserId.eq(user_id))
                .filter(entity::user_skill::Column::Skill.is_in(skills))
                .exec(self.db)
                .await?;
        }

        self.get_for_user(user_id).await
    }
}

/// Trims, drops empty entries and removes duplicates.
fn dedup(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Inserts the skills the user doesn't already have.
async fn insert_ignoring_duplicates<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    skills: Vec<String>,
) -> Result<(), DbErr> {
    let existing: HashSet<String> = entity::prelude::UserSkill::find()
        .filter(entity::user_skill::Column::UserId.eq(user_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|r| r.skill)
        .collect();

    let models: Vec<_> = skills
        .into_iter()
        .filter(|skill| !existing.contains(skill))
        .map(|skill| entity::user_skill::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            skill: ActiveValue::Set(skill),
        })
        .collect();

    if models.is_empty() {
        return Ok(());
    }

    entity::prelude::UserSkill::insert_many(models)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}
