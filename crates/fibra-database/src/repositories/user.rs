//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;
use fibra_entity::user::{Role, User};

/// Repository for user lookup operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// List active users whose role is in the given set.
    pub async fn find_by_roles(&self, roles: &[Role]) -> AppResult<Vec<User>> {
        let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();

        sqlx::query_as::<_, User>(
            "SELECT * FROM users \
             WHERE active AND role = ANY($1::user_role[]) \
             ORDER BY created_at",
        )
        .bind(&role_names)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users by role", e))
    }

    /// Look up a user's email address.
    pub async fn email_of(&self, id: Uuid) -> AppResult<Option<String>> {
        let email: Option<Option<String>> =
            sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to look up user email", e)
                })?;
        Ok(email.flatten())
    }
}
