//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A notification delivered to a single user.
///
/// Created by the fan-out service, owned exclusively by the target user.
/// Only the read flag is ever mutated; content is never edited and the
/// core never hard-deletes rows (retention is an external concern).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Semantic type tag (e.g. `new_lead`, `invoice_overdue`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Whether the user has read this notification.
    pub read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

/// Payload for creating a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: Uuid,
    /// Semantic type tag.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl NewNotification {
    /// Create a payload for the given user.
    pub fn new(user_id: Uuid, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
