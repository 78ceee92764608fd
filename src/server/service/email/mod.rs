//! Outbound email through the Resend HTTP API.
//!
//! Sending is best effort. Failures are logged and never surface to the caller.

pub mod template;

use serde::Serialize;

use crate::server::error::AppError;

pub use template::EmailMessage;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Clone)]
pub struct EmailService {
    http_client: reqwest::Client,
    /// Messages are only logged when unset
    api_key: Option<String>,
    from: String,
}

impl EmailService {
    pub fn new(http_client: reqwest::Client, api_key: Option<String>, from: String) -> Self {
        Self {
            http_client,
            api_key,
            from,
        }
    }

    /// Email service that logs every message instead of sending it.
    #[cfg(test)]
    pub fn log_only() -> Self {
        Self::new(reqwest::Client::new(), None, "Study Buddy <noreply@localhost>".to_string())
    }

    /// Sends a message, logging instead of failing on any error.
    pub async fn send(&self, message: EmailMessage) {
        if let Err(e) = self.try_send(&message).await {
            tracing::error!(
                "Failed to send email '{}' to {}: {}",
                message.subject,
                message.to,
                e
            );
        }
    }

    /// Sends each message in turn.
    pub async fn send_all(&self, messages: Vec<EmailMessage>) {
        for message in messages {
            self.send(message).await;
        }
    }

    async fn try_send(&self, message: &EmailMessage) -> Result<(), AppError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::info!(
                "Email delivery disabled, skipping '{}' to {}",
                message.subject,
                message.to
            );
            return Ok(());
        };

        let body = ResendRequest {
            from: &self.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };

        self.http_client
            .post(RESEND_ENDPOINT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("Sent email '{}' to {}", message.subject, message.to);

        Ok(())
    }
}
