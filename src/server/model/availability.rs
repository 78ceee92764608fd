//! Availability domain model and window validation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::study_buddy::{AvailabilityDto, CreateAvailabilityDto},
    server::{error::AppError, util::time::normalize_hhmm},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub id: Uuid,
    pub user_id: Uuid,
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    pub fn from_entity(entity: entity::availability::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            day_of_week: entity.day_of_week,
            start_time: entity.start_time,
            end_time: entity.end_time,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> AvailabilityDto {
        AvailabilityDto {
            id: self.id,
            user_id: self.user_id,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn window(&self) -> AvailabilityWindow {
        AvailabilityWindow {
            day_of_week: self.day_of_week,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// A validated weekly window with normalized `HH:MM` bounds.
///
/// Construct through `try_new` so that `start_time < end_time` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityWindow {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
}

impl AvailabilityWindow {
    /// Validates and normalizes a window.
    ///
    /// # Returns
    /// - `Ok(AvailabilityWindow)` - Day in 0..=6, both times valid, start before end
    /// - `Err(AppError::BadRequest)` - Any of the above fails
    pub fn try_new(day_of_week: i32, start_time: &str, end_time: &str) -> Result<Self, AppError> {
        if !(0..=6).contains(&day_of_week) {
            return Err(AppError::BadRequest(
                "dayOfWeek must be between 0 (Sunday) and 6 (Saturday)".to_string(),
            ));
        }

        let start = normalize_hhmm(start_time).ok_or_else(|| {
            AppError::BadRequest("startTime must be in HH:MM format".to_string())
        })?;
        let end = normalize_hhmm(end_time)
            .ok_or_else(|| AppError::BadRequest("endTime must be in HH:MM format".to_string()))?;

        if start >= end {
            return Err(AppError::BadRequest(
                "startTime must be before endTime".to_string(),
            ));
        }

        Ok(Self {
            day_of_week,
            start_time: start,
            end_time: end,
        })
    }

    pub fn from_dto(dto: &CreateAvailabilityDto) -> Result<Self, AppError> {
        Self::try_new(dto.day_of_week, &dto.start_time, &dto.end_time)
    }

    /// Two windows overlap when they share a day and `a.start < b.end && a.end > b.start`.
    ///
    /// Touching windows (`09:00-10:00` and `10:00-11:00`) do not overlap.
    pub fn overlaps(&self, other: &AvailabilityWindow) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && self.end_time > other.start_time
    }

    /// Whether a time of day falls in `[start, end)`.
    pub fn contains(&self, time_of_day: &str) -> bool {
        self.start_time.as_str() <= time_of_day && time_of_day < self.end_time.as_str()
    }
}
