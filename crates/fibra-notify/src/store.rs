//! Persistence seams for the fan-out service.
//!
//! The fan-out only needs a narrow slice of the store: batch insert,
//! single insert, and a recency check for the dedup window. Keeping the
//! slice behind traits lets tests drive the service with in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fibra_core::result::AppResult;
use fibra_database::repositories::notification::NotificationRepository;
use fibra_database::repositories::user::UserRepository;
use fibra_entity::notification::{NewNotification, Notification};
use fibra_entity::user::Role;

/// A notification recipient resolved from the user directory.
#[derive(Debug, Clone)]
pub struct Recipient {
    /// The user's id.
    pub id: Uuid,
    /// The user's email, if on file.
    pub email: Option<String>,
}

/// Notification persistence operations used by the fan-out.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug {
    /// Insert a batch of notifications. Returns rows created.
    async fn insert_many(&self, rows: &[NewNotification]) -> AppResult<u64>;

    /// Insert a single notification.
    async fn insert(&self, row: &NewNotification) -> AppResult<Notification>;

    /// Whether a notification of this kind exists for the user since `since`.
    async fn exists_recent(
        &self,
        user_id: Uuid,
        kind: &str,
        since: DateTime<Utc>,
    ) -> AppResult<bool>;
}

/// User resolution operations used by the fan-out.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// Resolve all active users whose role is in the set.
    async fn users_by_roles(&self, roles: &[Role]) -> AppResult<Vec<Recipient>>;

    /// Look up one user's email address.
    async fn email_of(&self, user_id: Uuid) -> AppResult<Option<String>>;
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert_many(&self, rows: &[NewNotification]) -> AppResult<u64> {
        NotificationRepository::insert_many(self, rows).await
    }

    async fn insert(&self, row: &NewNotification) -> AppResult<Notification> {
        NotificationRepository::insert(self, row).await
    }

    async fn exists_recent(
        &self,
        user_id: Uuid,
        kind: &str,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        NotificationRepository::exists_recent(self, user_id, kind, since).await
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn users_by_roles(&self, roles: &[Role]) -> AppResult<Vec<Recipient>> {
        let users = UserRepository::find_by_roles(self, roles).await?;
        Ok(users
            .into_iter()
            .map(|u| Recipient {
                id: u.id,
                email: u.email,
            })
            .collect())
    }

    async fn email_of(&self, user_id: Uuid) -> AppResult<Option<String>> {
        UserRepository::email_of(self, user_id).await
    }
}
