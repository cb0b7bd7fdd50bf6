//! Invoice/milestone sync.
//!
//! Brings issued invoices in line with project progress: each project
//! should have one invoice per completed milestone or accrued quote
//! installment, whichever is greater.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use fibra_auth::rbac::can_access;
use fibra_core::config::maintenance::MaintenanceConfig;
use fibra_core::result::AppResult;
use fibra_database::repositories::billing::BillingRepository;
use fibra_entity::module::Module;
use fibra_entity::user::Role;
use fibra_notify::Notifier;

use super::MaintenanceTask;

/// Projects examined per sync run.
const PROJECT_LIMIT: i64 = 300;

/// Roles notified when the sync issues invoices.
const NOTIFY_ROLES: [Role; 5] = [
    Role::Admin,
    Role::Management,
    Role::Accounting,
    Role::Finance,
    Role::Sales,
];

/// Creates missing invoices from completed milestones and accrued installments.
#[derive(Debug)]
pub struct InvoiceMilestoneSyncTask {
    billing: Arc<BillingRepository>,
    notifier: Arc<Notifier>,
    interval: Duration,
}

impl InvoiceMilestoneSyncTask {
    /// Creates the task from the maintenance configuration.
    pub fn new(
        billing: Arc<BillingRepository>,
        notifier: Arc<Notifier>,
        config: &MaintenanceConfig,
    ) -> Self {
        Self {
            billing,
            notifier,
            interval: config.invoice_sync_interval(),
        }
    }
}

#[async_trait]
impl MaintenanceTask for InvoiceMilestoneSyncTask {
    fn name(&self) -> &str {
        "sync_invoices_from_milestones"
    }

    fn guard_key(&self, _user_id: Uuid) -> String {
        "maintenance:sync-invoices-milestones".to_string()
    }

    fn min_interval(&self) -> Duration {
        self.interval
    }

    fn enabled_for(&self, role: Role) -> bool {
        can_access(role, Module::Sales)
    }

    async fn run(&self, _user_id: Uuid) -> AppResult<()> {
        let now = Utc::now();
        let snapshots = self.billing.project_billing_snapshots(PROJECT_LIMIT).await?;

        let mut created = 0i64;
        for snapshot in &snapshots {
            let missing = snapshot.missing_invoices(now);
            if missing == 0 {
                continue;
            }

            let amount = snapshot.installment_amount();
            for _ in 0..missing {
                let number = self.billing.generate_invoice_number().await?;
                self.billing
                    .create_generated_invoice(&number, snapshot.client_id, snapshot.id, amount)
                    .await?;
            }

            created += missing;
            info!(
                project = %snapshot.name,
                created = missing,
                amount,
                "Invoices generated from milestones"
            );
        }

        if created > 0 {
            let report = self
                .notifier
                .notify_roles(
                    &NOTIFY_ROLES,
                    "invoice_update",
                    &format!("Milestone auto-sync: {created} invoice(s) issued."),
                )
                .await?;
            if let Some(error) = report.email_error {
                warn!(error, "Invoice sync notification email failed");
            }
        }

        Ok(())
    }
}
