//! Default catalog seeding.
//!
//! Seeds are idempotent: both statements skip rows whose name already
//! exists, so a repeated run is a no-op.

use sqlx::PgPool;

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;

use crate::retry::with_pool_retry;

/// The studio's default service catalog.
const DEFAULT_SERVICES: [(&str, &str, f64); 5] = [
    (
        "Branding",
        "Brand identity development and visual system.",
        2500.0,
    ),
    (
        "Web Design",
        "Design and prototyping of corporate or e-commerce websites.",
        3200.0,
    ),
    (
        "Social Media Management",
        "Planning, content, and management of social channels.",
        1200.0,
    ),
    (
        "Audiovisual Production",
        "Video, multimedia pieces, and audiovisual content production.",
        2800.0,
    ),
    (
        "Performance Campaigns",
        "Paid digital campaigns focused on leads and conversions.",
        1800.0,
    ),
];

/// Default accounting banks.
const DEFAULT_BANKS: [(&str, &str); 5] = [
    ("BCP", "BCP"),
    ("Interbank", "IBK"),
    ("BBVA", "BBVA"),
    ("Scotiabank", "SCOTIA"),
    ("Banco de la Nación", "BN"),
];

/// Repository for seeding default catalogs.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ensure the default service catalog rows exist.
    pub async fn seed_default_services(&self) -> AppResult<u64> {
        let names: Vec<&str> = DEFAULT_SERVICES.iter().map(|s| s.0).collect();
        let descriptions: Vec<&str> = DEFAULT_SERVICES.iter().map(|s| s.1).collect();
        let prices: Vec<f64> = DEFAULT_SERVICES.iter().map(|s| s.2).collect();

        let result = with_pool_retry(|| async {
            sqlx::query(
                "INSERT INTO service_catalog (name, description, average_price, currency) \
                 SELECT name, description, price, 'USD' \
                 FROM UNNEST($1::text[], $2::text[], $3::float8[]) AS t(name, description, price) \
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(&names)
            .bind(&descriptions)
            .bind(&prices)
            .execute(&self.pool)
            .await
        })
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to seed default services", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Ensure the default accounting bank rows exist.
    pub async fn seed_default_banks(&self) -> AppResult<u64> {
        let names: Vec<&str> = DEFAULT_BANKS.iter().map(|b| b.0).collect();
        let codes: Vec<&str> = DEFAULT_BANKS.iter().map(|b| b.1).collect();

        let result = with_pool_retry(|| async {
            sqlx::query(
                "INSERT INTO accounting_banks (name, code) \
                 SELECT name, code FROM UNNEST($1::text[], $2::text[]) AS t(name, code) \
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(&names)
            .bind(&codes)
            .execute(&self.pool)
            .await
        })
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to seed default banks", e)
        })?;

        Ok(result.rows_affected())
    }
}
