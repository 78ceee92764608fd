//! Study buddy directory models and filters.

use crate::{
    model::{
        api::SortOrder,
        study_buddy::{StudyBuddyDetailDto, StudyBuddyDto, StudyBuddyQuery},
    },
    server::model::{
        availability::Availability,
        pagination::{PageRequest, DEFAULT_LIMIT},
        session::SessionWithParticipants,
        user::User,
    },
};

/// Number of completed sessions shown on a buddy's detail page.
pub const RECENT_SESSIONS_LIMIT: u64 = 5;

/// A listed buddy with skills, weekly availability and completed session count.
#[derive(Debug, Clone)]
pub struct StudyBuddy {
    pub user: User,
    pub skills: Vec<String>,
    pub availability: Vec<Availability>,
    pub completed_sessions: u64,
}

impl StudyBuddy {
    pub fn into_dto(self) -> StudyBuddyDto {
        StudyBuddyDto {
            id: self.user.id,
            name: self.user.name,
            email: self.user.email,
            role: self.user.role,
            bio: self.user.bio,
            avatar_url: self.user.avatar_url,
            school_name: self.user.school_name,
            study_year: self.user.study_year,
            major: self.user.major,
            skills: self.skills,
            availability: self
                .availability
                .into_iter()
                .map(Availability::into_dto)
                .collect(),
            completed_sessions: self.completed_sessions,
            created_at: self.user.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudyBuddyDetail {
    pub buddy: StudyBuddy,
    pub recent_sessions: Vec<SessionWithParticipants>,
}

impl StudyBuddyDetail {
    pub fn into_dto(self) -> StudyBuddyDetailDto {
        StudyBuddyDetailDto {
            buddy: self.buddy.into_dto(),
            recent_sessions: self
                .recent_sessions
                .into_iter()
                .map(SessionWithParticipants::into_dto)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuddySortField {
    Name,
    #[default]
    CreatedAt,
    SchoolName,
    /// Sorted in memory after counting, not in SQL
    CompletedSessions,
}

impl BuddySortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("name") => Self::Name,
            Some("schoolName") => Self::SchoolName,
            Some("completedSessions") => Self::CompletedSessions,
            _ => Self::CreatedAt,
        }
    }
}

/// Filters for listing bookable buddies.
#[derive(Debug, Clone, Default)]
pub struct BuddyFilter {
    /// Exact skill name the buddy must have
    pub module: Option<String>,
    pub search: Option<String>,
    pub school_name: Option<String>,
    pub study_year: Option<String>,
    pub major: Option<String>,
    pub sort_by: BuddySortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl BuddyFilter {
    pub fn from_query(query: StudyBuddyQuery) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        Self {
            module: non_empty(query.module),
            search: non_empty(query.search),
            school_name: non_empty(query.school_name),
            study_year: non_empty(query.study_year),
            major: non_empty(query.major),
            sort_by: BuddySortField::parse(query.sort_by.as_deref()),
            sort_order: query.sort_order.unwrap_or_default(),
            page: PageRequest::new(query.page, query.limit, DEFAULT_LIMIT),
        }
    }
}
