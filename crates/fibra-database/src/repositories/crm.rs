//! CRM data-quality queries.
//!
//! These back the recurring data-quality scans: they surface records with
//! missing fields so the scan can nag the responsible user.

use sqlx::{FromRow, PgPool};

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;

use crate::retry::with_pool_retry;

/// A contact with required fields missing.
#[derive(Debug, Clone, FromRow)]
pub struct ContactGap {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
}

impl ContactGap {
    /// Short display name for example lists.
    pub fn short_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "Unnamed".to_string()
        } else {
            name.to_string()
        }
    }
}

/// A project with required fields missing.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectGap {
    /// Project name.
    pub name: String,
}

/// Repository for CRM data-quality queries.
#[derive(Debug, Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    /// Create a new CRM repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Contacts missing phone, contact method, or country.
    pub async fn find_incomplete_contacts(&self, limit: i64) -> AppResult<Vec<ContactGap>> {
        with_pool_retry(|| async {
            sqlx::query_as::<_, ContactGap>(
                "SELECT first_name, last_name FROM contacts \
                 WHERE phone IS NULL OR phone = '' \
                    OR contact_method IS NULL OR contact_method = '' \
                    OR country IS NULL OR country = '' \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        })
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to scan incomplete contacts", e)
        })
    }

    /// Projects missing an end date, a service type, or a positive budget.
    pub async fn find_incomplete_projects(&self, limit: i64) -> AppResult<Vec<ProjectGap>> {
        with_pool_retry(|| async {
            sqlx::query_as::<_, ProjectGap>(
                "SELECT name FROM projects \
                 WHERE end_date IS NULL \
                    OR service_type IS NULL OR service_type = '' \
                    OR budget <= 0 \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        })
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to scan incomplete projects", e)
        })
    }
}
