//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;
use fibra_entity::notification::{NewNotification, Notification};

/// Repository for notification persistence and read-state transitions.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of notifications in one statement.
    pub async fn insert_many(&self, rows: &[NewNotification]) -> AppResult<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
        let kinds: Vec<String> = rows.iter().map(|r| r.kind.clone()).collect();
        let messages: Vec<String> = rows.iter().map(|r| r.message.clone()).collect();

        let result = sqlx::query(
            "INSERT INTO notifications (user_id, kind, message) \
             SELECT * FROM UNNEST($1::uuid[], $2::text[], $3::text[])",
        )
        .bind(&user_ids)
        .bind(&kinds)
        .bind(&messages)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notifications", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Insert a single notification.
    pub async fn insert(&self, row: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, kind, message) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(row.user_id)
        .bind(&row.kind)
        .bind(&row.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })
    }

    /// Whether a notification of this kind exists for the user since `since`.
    pub async fn exists_recent(
        &self,
        user_id: Uuid,
        kind: &str,
        since: DateTime<Utc>,
    ) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(\
                SELECT 1 FROM notifications \
                WHERE user_id = $1 AND kind = $2 AND created_at >= $3\
             )",
        )
        .bind(user_id)
        .bind(kind)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check recent notification", e)
        })
    }

    /// List notifications for a user, newest first.
    pub async fn find_by_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })
    }

    /// Type tags of every unread notification for a user.
    pub async fn unread_kinds(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar("SELECT kind FROM notifications WHERE user_id = $1 AND NOT read")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list unread kinds", e)
            })
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT read")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark one notification as read (owner-scoped). Returns rows affected.
    pub async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
                .bind(notification_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected())
    }

    /// Mark all of a user's notifications as read. Returns rows affected.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND NOT read")
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to mark all read", e)
                })?;
        Ok(result.rows_affected())
    }
}
