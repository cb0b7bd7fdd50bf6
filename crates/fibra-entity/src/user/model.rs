//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A platform user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address, if one is on file.
    pub email: Option<String>,
    /// The user's role.
    pub role: Role,
    /// Whether the account is active.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name, or a placeholder when both parts are empty.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "Unnamed".to_string()
        } else {
            name.to_string()
        }
    }
}
