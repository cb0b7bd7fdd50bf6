//! Session repository implementation.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;
use fibra_entity::user::Role;

/// The identity columns resolved from a live session.
#[derive(Debug, Clone, FromRow)]
pub struct SessionPrincipalRow {
    /// The session owner's user id.
    pub id: Uuid,
    /// The owner's role.
    pub role: Role,
    /// The owner's email, if on file.
    pub email: Option<String>,
}

/// Repository for session-token resolution.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a bearer token into the owning user's identity columns.
    ///
    /// Expired sessions and inactive users resolve to `None`.
    pub async fn find_principal_by_token(
        &self,
        token: &str,
    ) -> AppResult<Option<SessionPrincipalRow>> {
        sqlx::query_as::<_, SessionPrincipalRow>(
            "SELECT u.id, u.role, u.email \
             FROM sessions s \
             JOIN users u ON u.id = s.user_id \
             WHERE s.token = $1 AND s.expires_at > NOW() AND u.active",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve session", e))
    }
}
