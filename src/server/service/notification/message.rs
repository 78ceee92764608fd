//! In-app notification messages.
//!
//! Each builder returns the notification for one recipient. Session dates are
//! rendered as `YYYY-MM-DD`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::{notification::NotificationType, session::SessionStatus},
    server::model::notification::CreateNotificationParams,
};

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Notifications for a new booking: the buddy's first, then the learner's.
pub fn session_booked(
    buddy_id: Uuid,
    buddy_name: &str,
    learner_id: Uuid,
    learner_name: &str,
    module: &str,
    topic: &str,
    date: DateTime<Utc>,
) -> [CreateNotificationParams; 2] {
    let date = format_date(date);

    [
        CreateNotificationParams::new(
            buddy_id,
            NotificationType::SessionBooked,
            format!(
                "New session booked! {} has booked a session with you for {} - {} on {}",
                learner_name, module, topic, date
            ),
        ),
        CreateNotificationParams::new(
            learner_id,
            NotificationType::SessionBooked,
            format!(
                "Session confirmed! Your session with {} for {} - {} is scheduled for {}",
                buddy_name, module, topic, date
            ),
        ),
    ]
}

/// The same status-change notification for both participants.
pub fn session_updated(
    participant_ids: [Uuid; 2],
    status: SessionStatus,
    module: &str,
    topic: &str,
) -> Vec<CreateNotificationParams> {
    let message = format!(
        "Session status updated to {} for {} - {}",
        status.as_str(),
        module,
        topic
    );

    participant_ids
        .into_iter()
        .map(|user_id| {
            CreateNotificationParams::new(
                user_id,
                NotificationType::SessionUpdated,
                message.clone(),
            )
        })
        .collect()
}

pub fn ticket_raised(
    buddy_id: Uuid,
    creator_name: &str,
    module: &str,
    topic: &str,
) -> CreateNotificationParams {
    CreateNotificationParams::new(
        buddy_id,
        NotificationType::TicketRaised,
        format!(
            "New help request: {} needs help with {} - {}",
            creator_name, module, topic
        ),
    )
}

pub fn ticket_claimed(
    creator_id: Uuid,
    claimer_name: &str,
    module: &str,
    topic: &str,
) -> CreateNotificationParams {
    CreateNotificationParams::new(
        creator_id,
        NotificationType::TicketClaimed,
        format!(
            "Great news! {} has claimed your help request for {} - {}",
            claimer_name, module, topic
        ),
    )
}

pub fn ticket_comment(
    recipient_id: Uuid,
    commenter_name: &str,
    module: &str,
    topic: &str,
) -> CreateNotificationParams {
    CreateNotificationParams::new(
        recipient_id,
        NotificationType::TicketComment,
        format!(
            "{} commented on the ticket: {} - {}",
            commenter_name, module, topic
        ),
    )
}
