//! Meeting links and calendar integration status.
//!
//! There is no live calendar API behind this service. Links are generated locally in
//! the Google Meet `xxx-xxxx-xxx` format.

use crate::{model::calendar::CalendarHealthDto, server::util::token};

const MEET_BASE_URL: &str = "https://meet.google.com";

#[derive(Clone, Debug)]
pub struct CalendarService {
    configured: bool,
}

impl CalendarService {
    /// Both Google credentials must be present for the integration to count as configured.
    pub fn new(client_id: Option<&str>, client_secret: Option<&str>) -> Self {
        Self {
            configured: client_id.is_some() && client_secret.is_some(),
        }
    }

    /// Generates a meeting link such as `https://meet.google.com/abc-defg-hij`.
    pub fn meeting_link(&self) -> String {
        format!(
            "{}/{}-{}-{}",
            MEET_BASE_URL,
            token::lowercase_letters(3),
            token::lowercase_letters(4),
            token::lowercase_letters(3)
        )
    }

    pub fn health(&self) -> CalendarHealthDto {
        if self.configured {
            CalendarHealthDto {
                configured: true,
                connected: true,
                status: "healthy".to_string(),
                message: "Google Calendar credentials are configured".to_string(),
            }
        } else {
            CalendarHealthDto {
                configured: false,
                connected: false,
                status: "not_configured".to_string(),
                message: "Google Calendar credentials are not configured".to_string(),
            }
        }
    }
}
