//! Email subjects and HTML bodies.

use crate::model::ticket::TicketStatus;

/// A rendered email ready for sending.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    fn new(to: &str, subject: &str, content: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: subject.to_string(),
            html: layout(content),
        }
    }
}

fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Study Buddy</title></head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f6f6f6;">
  <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 600px; margin: 0 auto;">
    <tr><td style="padding: 30px 20px; background-color: #2c3e50; text-align: center;">
      <h1 style="color: #ffffff; margin: 0; font-size: 24px;">Study Buddy</h1>
    </td></tr>
    <tr><td style="padding: 30px 20px; background-color: #ffffff; color: #333333;">{}</td></tr>
    <tr><td style="padding: 20px; background-color: #ecf0f1; text-align: center; color: #666666; font-size: 12px;">
      You are receiving this email because you have a Study Buddy account.
    </td></tr>
  </table>
</body>
</html>"#,
        content
    )
}

pub fn verification_code(to: &str, code: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Verify your email",
        &format!(
            "<p>Use the code below to verify your email address.</p>\
             <p style=\"font-size: 28px; letter-spacing: 4px;\"><strong>{}</strong></p>",
            code
        ),
    )
}

pub fn password_reset(to: &str, token: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Reset your password",
        &format!(
            "<p>We received a request to reset your password. Use this token within one hour:</p>\
             <p><strong>{}</strong></p>\
             <p>If you did not request a reset you can ignore this email.</p>",
            token
        ),
    )
}

pub fn welcome(to: &str, name: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Welcome to Study Buddy",
        &format!(
            "<p>Hi {},</p><p>Your email is verified and your account is ready.</p>",
            name
        ),
    )
}

pub fn account_deleted(to: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Account deletion confirmation",
        "<p>Your account has been deleted.</p>",
    )
}

pub fn password_changed(to: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Password change confirmation",
        "<p>Your password has been changed.</p>",
    )
}

/// Sent to the buddy when a learner books them.
pub fn session_requested(
    to: &str,
    learner: &str,
    module: &str,
    topic: &str,
    date: &str,
) -> EmailMessage {
    EmailMessage::new(
        to,
        "New Session Request",
        &format!(
            "<p>You have a new session request from {} for {} - {} on {}.</p>",
            learner, module, topic, date
        ),
    )
}

/// Sent to the learner after booking.
pub fn session_submitted(to: &str, buddy: &str, module: &str, topic: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Session Request Submitted",
        &format!(
            "<p>Your session request with {} for {} - {} has been submitted and is pending confirmation.</p>",
            buddy, module, topic
        ),
    )
}

pub fn session_confirmed(to: &str, partner: &str, date: &str, meeting_link: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Session Confirmed",
        &format!(
            "<p>Your session with {} has been confirmed for {}.</p>\
             <p>Meeting link: <a href=\"{link}\">{link}</a></p>",
            partner,
            date,
            link = meeting_link
        ),
    )
}

pub fn session_cancelled(to: &str, partner: &str, date: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Session Cancelled",
        &format!(
            "<p>The session with {} scheduled for {} has been cancelled.</p>",
            partner, date
        ),
    )
}

pub fn session_completed(to: &str, partner: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Session Completed",
        &format!(
            "<p>The session with {} has been marked as completed.</p>",
            partner
        ),
    )
}

pub fn help_request_available(to: &str, module: &str, topic: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "New Help Request Available",
        &format!(
            "<p>A new help request for {} - {} is available. Check it out on the platform!</p>",
            module, topic
        ),
    )
}

pub fn ticket_claimed(to: &str, claimer: &str, module: &str, topic: &str) -> EmailMessage {
    EmailMessage::new(
        to,
        "Your Help Request Has Been Claimed",
        &format!(
            "<p>{} has claimed your help request for {} - {}. They will reach out to you soon!</p>",
            claimer, module, topic
        ),
    )
}

/// Sent to the creator when a ticket is resolved or closed. `None` for other statuses.
pub fn ticket_finished(
    to: &str,
    status: TicketStatus,
    module: &str,
    topic: &str,
) -> Option<EmailMessage> {
    let (subject, outcome) = match status {
        TicketStatus::Resolved => ("Help Request Resolved", "has been marked as resolved"),
        TicketStatus::Closed => ("Help Request Closed", "has been closed"),
        TicketStatus::Open | TicketStatus::Claimed => return None,
    };

    Some(EmailMessage::new(
        to,
        subject,
        &format!(
            "<p>Your help request for {} - {} {}.</p>",
            module, topic, outcome
        ),
    ))
}

pub fn ticket_comment_for_creator(
    to: &str,
    commenter: &str,
    module: &str,
    topic: &str,
) -> EmailMessage {
    EmailMessage::new(
        to,
        "New Comment on Your Help Request",
        &format!(
            "<p>{} commented on your help request for {} - {}.</p>",
            commenter, module, topic
        ),
    )
}

pub fn ticket_comment_for_claimer(
    to: &str,
    commenter: &str,
    module: &str,
    topic: &str,
) -> EmailMessage {
    EmailMessage::new(
        to,
        "New Comment on Claimed Help Request",
        &format!(
            "<p>{} commented on the help request for {} - {} that you claimed.</p>",
            commenter, module, topic
        ),
    )
}
