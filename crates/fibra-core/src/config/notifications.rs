//! Notification fan-out and email relay configuration.

use serde::{Deserialize, Serialize};

/// Notification fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Whether persisted notifications are also relayed by email.
    #[serde(default)]
    pub email_enabled: bool,
    /// Default dedup window in hours for `notify_user_once`.
    #[serde(default = "default_dedupe_window")]
    pub dedupe_window_hours: u64,
    /// Timeout in seconds for a single email relay request.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_seconds: u64,
    /// Transactional email provider settings.
    #[serde(default)]
    pub brevo: BrevoConfig,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email_enabled: false,
            dedupe_window_hours: default_dedupe_window(),
            send_timeout_seconds: default_send_timeout(),
            brevo: BrevoConfig::default(),
        }
    }
}

/// Brevo transactional email API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrevoConfig {
    /// API endpoint for transactional sends.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// API key. Empty disables the channel (sends report a dispatch error).
    #[serde(default)]
    pub api_key: String,
    /// Sender address.
    #[serde(default)]
    pub sender_email: String,
    /// Sender display name.
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl Default for BrevoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            sender_email: String::new(),
            sender_name: default_sender_name(),
        }
    }
}

fn default_dedupe_window() -> u64 {
    12
}

fn default_send_timeout() -> u64 {
    5
}

fn default_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_sender_name() -> String {
    "Fibra Core".to_string()
}
