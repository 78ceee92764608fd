//! Study buddy directory and availability management.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::study_buddy::{CreateAvailabilityDto, ReplaceAvailabilityDto, UpdateAvailabilityDto},
    server::{
        data::{
            availability::AvailabilityRepository, session::SessionRepository,
            skill::SkillRepository, study_buddy::StudyBuddyRepository,
        },
        error::AppError,
        model::{
            availability::{Availability, AvailabilityWindow},
            pagination::{PageRequest, Paginated},
            study_buddy::{BuddyFilter, StudyBuddy, StudyBuddyDetail, RECENT_SESSIONS_LIMIT},
            user::User,
        },
    },
};

fn availability_not_found() -> AppError {
    AppError::NotFound("Availability not found or unauthorized".to_string())
}

fn overlapping() -> AppError {
    AppError::Conflict("Overlapping availability exists for this time slot".to_string())
}

fn require_buddy(user: &User) -> Result<(), AppError> {
    if !user.role.is_buddy() {
        return Err(AppError::Forbidden(
            "Only study buddies can manage availability".to_string(),
        ));
    }

    Ok(())
}

pub struct StudyBuddyService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> StudyBuddyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists bookable buddies with their skills, availability and completed sessions.
    ///
    /// A buddy is listed when buddy-capable, active, email-verified and has at least one
    /// availability window.
    pub async fn list(&self, filter: BuddyFilter) -> Result<Paginated<StudyBuddy>, AppError> {
        let page = StudyBuddyRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        let ids: Vec<Uuid> = page.items.iter().map(|(user, _)| user.id).collect();
        let mut skills = SkillRepository::new(self.db).get_for_users(&ids).await?;
        let mut availability = AvailabilityRepository::new(self.db)
            .get_for_users(&ids)
            .await?;

        Ok(page.map(|(user, completed_sessions)| StudyBuddy {
            skills: skills.remove(&user.id).unwrap_or_default(),
            availability: availability.remove(&user.id).unwrap_or_default(),
            completed_sessions,
            user,
        }))
    }

    /// Lists buddies matching a free-text query.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Query missing or blank
    pub async fn search(
        &self,
        query: Option<String>,
        page: PageRequest,
    ) -> Result<Paginated<StudyBuddy>, AppError> {
        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            return Err(AppError::BadRequest("Search query is required".to_string()));
        };

        self.list(BuddyFilter {
            search: Some(query.trim().to_string()),
            page,
            ..Default::default()
        })
        .await
    }

    /// Gets a listed buddy with their five most recent completed sessions.
    pub async fn get(&self, id: Uuid) -> Result<StudyBuddyDetail, AppError> {
        let user = StudyBuddyRepository::new(self.db)
            .find_listed(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Study buddy not found".to_string()))?;

        let session_repo = SessionRepository::new(self.db);
        let completed_sessions = session_repo
            .count_completed_by_buddies(&[id])
            .await?
            .remove(&id)
            .unwrap_or(0);
        let recent_sessions = session_repo
            .get_recent_completed_as_buddy(id, RECENT_SESSIONS_LIMIT)
            .await?;

        let skills = SkillRepository::new(self.db).get_for_user(id).await?;
        let availability = AvailabilityRepository::new(self.db)
            .get_for_user(id)
            .await?;

        Ok(StudyBuddyDetail {
            buddy: StudyBuddy {
                user,
                skills,
                availability,
                completed_sessions,
            },
            recent_sessions,
        })
    }

    /// Adds a weekly window for the calling buddy.
    ///
    /// # Returns
    /// - `Ok(Availability)` - Created window with normalized times
    /// - `Err(AppError::Forbidden)` - Caller is not buddy-capable
    /// - `Err(AppError::BadRequest)` - Bad day or time, or start not before end
    /// - `Err(AppError::Conflict)` - Overlaps an existing window
    pub async fn add_availability(
        &self,
        caller: &User,
        dto: CreateAvailabilityDto,
    ) -> Result<Availability, AppError> {
        require_buddy(caller)?;
        let window = AvailabilityWindow::from_dto(&dto)?;
        let repo = AvailabilityRepository::new(self.db);

        if repo.has_overlap(caller.id, &window, None).await? {
            return Err(overlapping());
        }

        let availability = repo.create(caller.id, window).await?;

        tracing::debug!(
            "Buddy {} added availability {} on day {}",
            caller.id,
            availability.id,
            availability.day_of_week
        );

        Ok(availability)
    }

    /// Gets the caller's windows ordered by day, then start time.
    pub async fn my_availability(&self, user_id: Uuid) -> Result<Vec<Availability>, AppError> {
        Ok(AvailabilityRepository::new(self.db)
            .get_for_user(user_id)
            .await?)
    }

    /// Replaces every window of the calling buddy in one transaction.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Two submitted windows overlap each other
    pub async fn replace_availability(
        &self,
        caller: &User,
        dto: ReplaceAvailabilityDto,
    ) -> Result<Vec<Availability>, AppError> {
        require_buddy(caller)?;

        let windows = dto
            .availabilities
            .iter()
            .map(AvailabilityWindow::from_dto)
            .collect::<Result<Vec<_>, _>>()?;

        for (i, window) in windows.iter().enumerate() {
            if windows[i + 1..].iter().any(|other| window.overlaps(other)) {
                return Err(overlapping());
            }
        }

        let replaced = AvailabilityRepository::new(self.db)
            .replace_all(caller.id, windows)
            .await?;

        tracing::info!(
            "Buddy {} replaced availability with {} windows",
            caller.id,
            replaced.len()
        );

        Ok(replaced)
    }

    /// Changes one of the caller's windows.
    ///
    /// Unset fields keep their current value. The merged window is validated and
    /// overlap-checked against the caller's other windows.
    pub async fn update_availability(
        &self,
        caller: &User,
        id: Uuid,
        dto: UpdateAvailabilityDto,
    ) -> Result<Availability, AppError> {
        let repo = AvailabilityRepository::new(self.db);
        let current = repo
            .find_owned(id, caller.id)
            .await?
            .ok_or_else(availability_not_found)?;

        let window = AvailabilityWindow::try_new(
            dto.day_of_week.unwrap_or(current.day_of_week),
            dto.start_time.as_deref().unwrap_or(&current.start_time),
            dto.end_time.as_deref().unwrap_or(&current.end_time),
        )?;

        if repo.has_overlap(caller.id, &window, Some(id)).await? {
            return Err(overlapping());
        }

        repo.update(id, window)
            .await?
            .ok_or_else(availability_not_found)
    }

    pub async fn delete_availability(&self, caller: &User, id: Uuid) -> Result<(), AppError> {
        if !AvailabilityRepository::new(self.db)
            .delete_owned(id, caller.id)
            .await?
        {
            return Err(availability_not_found());
        }

        Ok(())
    }
}
