//! Project billing queries for the invoice/milestone sync.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::RngExt;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fibra_core::error::{AppError, ErrorKind};
use fibra_core::result::AppResult;

use crate::retry::with_pool_retry;

/// Per-project billing counters used to derive missing invoices.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectBillingSnapshot {
    /// Project id.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// The client the project bills to.
    pub client_id: Uuid,
    /// Total project budget.
    pub budget: f64,
    /// Project start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Project status.
    pub status: String,
    /// Installments agreed in the accepted quote (0 when none).
    pub quote_installments: i64,
    /// Total milestones defined for the project.
    pub total_milestones: i64,
    /// Milestones already completed.
    pub completed_milestones: i64,
    /// Invoices issued so far (cancelled ones excluded).
    pub issued_invoices: i64,
}

impl ProjectBillingSnapshot {
    /// How many invoices the project should have by now.
    ///
    /// The target is the greater of completed milestones and accrued
    /// monthly installments; installments only accrue while the project
    /// status allows billing.
    pub fn target_invoices(&self, now: DateTime<Utc>) -> i64 {
        let status_allows = matches!(self.status.as_str(), "active" | "review" | "completed");
        let accrued = if status_allows {
            let start = self.start_date.unwrap_or(now);
            let months_elapsed = ((now.year() - start.year()) * 12
                + (now.month() as i32 - start.month() as i32))
                .max(0) as i64;
            self.quote_installments.max(0).min(months_elapsed + 1)
        } else {
            0
        };
        self.completed_milestones.max(accrued)
    }

    /// How many invoices are still missing.
    pub fn missing_invoices(&self, now: DateTime<Utc>) -> i64 {
        (self.target_invoices(now) - self.issued_invoices).max(0)
    }

    /// Amount per generated invoice: budget split across the larger of
    /// milestone count and installment count, rounded to cents.
    pub fn installment_amount(&self) -> f64 {
        let divisor = self.total_milestones.max(self.quote_installments).max(1) as f64;
        (self.budget / divisor * 100.0).round() / 100.0
    }
}

/// Repository for the invoice/milestone sync.
#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    /// Create a new billing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Billing counters for up to `limit` projects.
    pub async fn project_billing_snapshots(
        &self,
        limit: i64,
    ) -> AppResult<Vec<ProjectBillingSnapshot>> {
        with_pool_retry(|| async {
            sqlx::query_as::<_, ProjectBillingSnapshot>(
                "SELECT p.id, p.name, p.client_id, p.budget::float8 AS budget, \
                        p.start_date, p.status, \
                        COALESCE(q.installments_count, 0)::int8 AS quote_installments, \
                        (SELECT COUNT(*) FROM milestones m WHERE m.project_id = p.id) AS total_milestones, \
                        (SELECT COUNT(*) FROM milestones m \
                          WHERE m.project_id = p.id AND m.status = 'completed') AS completed_milestones, \
                        (SELECT COUNT(*) FROM invoices i \
                          WHERE i.project_id = p.id AND i.status <> 'cancelled') AS issued_invoices \
                 FROM projects p \
                 LEFT JOIN quotes q ON q.project_id = p.id \
                 ORDER BY p.created_at \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        })
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load billing snapshots", e)
        })
    }

    /// Generate an invoice number unique among existing invoices.
    ///
    /// Tries a handful of random candidates before falling back to a
    /// timestamp-derived suffix that cannot collide in practice.
    pub async fn generate_invoice_number(&self) -> AppResult<String> {
        let year = Utc::now().year();
        for _ in 0..5 {
            let suffix: u32 = rand::rng().random_range(10_000..100_000);
            let candidate = format!("INV-{year}-{suffix}");
            if !self.invoice_number_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Ok(format!("INV-{year}-{}", Utc::now().timestamp_millis()))
    }

    /// Create one generated invoice for a project installment.
    pub async fn create_generated_invoice(
        &self,
        invoice_number: &str,
        client_id: Uuid,
        project_id: Uuid,
        amount: f64,
    ) -> AppResult<()> {
        let now = Utc::now();
        let due = now + Duration::days(7);

        with_pool_retry(|| async {
            sqlx::query(
                "INSERT INTO invoices \
                 (invoice_number, client_id, project_id, amount, issue_date, due_date, status, payment_method) \
                 VALUES ($1, $2, $3, $4, $5, $6, 'sent', 'bank_transfer')",
            )
            .bind(invoice_number)
            .bind(client_id)
            .bind(project_id)
            .bind(amount)
            .bind(now)
            .bind(due)
            .execute(&self.pool)
            .await
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create invoice", e))?;

        Ok(())
    }

    async fn invoice_number_exists(&self, number: &str) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM invoices WHERE invoice_number = $1)")
            .bind(number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check invoice number", e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ProjectBillingSnapshot {
        ProjectBillingSnapshot {
            id: Uuid::new_v4(),
            name: "Rebrand".to_string(),
            client_id: Uuid::new_v4(),
            budget: 9000.0,
            start_date: Some(Utc::now() - Duration::days(70)),
            status: "active".to_string(),
            quote_installments: 3,
            total_milestones: 3,
            completed_milestones: 1,
            issued_invoices: 0,
        }
    }

    #[test]
    fn test_target_tracks_accrued_installments() {
        let snap = snapshot();
        // ~2 months elapsed, 3 installments agreed: 3.min(2 + 1) = 3 accrued,
        // which beats the single completed milestone.
        assert_eq!(snap.target_invoices(Utc::now()), 3);
        assert_eq!(snap.missing_invoices(Utc::now()), 3);
    }

    #[test]
    fn test_inactive_projects_accrue_nothing() {
        let mut snap = snapshot();
        snap.status = "paused".to_string();
        assert_eq!(snap.target_invoices(Utc::now()), 1);
    }

    #[test]
    fn test_installment_amount_splits_budget() {
        let snap = snapshot();
        assert_eq!(snap.installment_amount(), 3000.0);
    }

    #[test]
    fn test_missing_never_negative() {
        let mut snap = snapshot();
        snap.issued_invoices = 10;
        assert_eq!(snap.missing_invoices(Utc::now()), 0);
    }
}
