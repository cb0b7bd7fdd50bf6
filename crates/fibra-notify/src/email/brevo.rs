//! Brevo transactional email client.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use fibra_core::config::notifications::{BrevoConfig, NotificationConfig};
use fibra_core::error::AppError;
use fibra_core::result::AppResult;

use super::EmailChannel;

/// Email channel backed by the Brevo transactional HTTP API.
#[derive(Debug, Clone)]
pub struct BrevoMailer {
    /// HTTP client with the send timeout applied.
    http: reqwest::Client,
    /// Provider settings.
    config: BrevoConfig,
}

impl BrevoMailer {
    /// Creates a mailer from the notification configuration.
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.send_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.brevo.clone(),
        })
    }
}

/// Trim, lowercase, and drop empty addresses.
fn normalize_recipients(recipients: &[String]) -> Vec<String> {
    recipients
        .iter()
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .collect()
}

#[async_trait]
impl EmailChannel for BrevoMailer {
    async fn send(&self, recipients: &[String], subject: &str, body: &str) -> AppResult<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(AppError::dispatch("Brevo API key is not configured"));
        }
        if self.config.sender_email.trim().is_empty() {
            return Err(AppError::dispatch("Brevo sender email is not configured"));
        }

        let to = normalize_recipients(recipients);
        if to.is_empty() {
            return Err(AppError::dispatch("No valid recipients"));
        }
        if subject.trim().is_empty() {
            return Err(AppError::dispatch("Subject is required"));
        }

        let payload = serde_json::json!({
            "sender": {
                "name": self.config.sender_name,
                "email": self.config.sender_email,
            },
            "to": to.iter().map(|email| serde_json::json!({ "email": email })).collect::<Vec<_>>(),
            "subject": subject.trim(),
            "textContent": body,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .header("api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::dispatch(format!("Brevo request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            let snippet: String = detail.chars().take(200).collect();
            return Err(AppError::dispatch(format!(
                "Brevo error {status}: {snippet}"
            )));
        }

        debug!(recipients = to.len(), "Email dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_recipients() {
        let input = vec![
            "  Ana@Fibra.Studio ".to_string(),
            "".to_string(),
            "   ".to_string(),
            "bob@fibra.studio".to_string(),
        ];
        assert_eq!(
            normalize_recipients(&input),
            vec!["ana@fibra.studio".to_string(), "bob@fibra.studio".to_string()]
        );
    }
}
