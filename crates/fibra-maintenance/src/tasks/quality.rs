//! Data-quality scans.
//!
//! Each scan looks for records with missing required fields and nags the
//! requesting user through the dedup-window notification variant, so the
//! same alert repeats at most once per window.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use fibra_auth::rbac::can_access;
use fibra_core::config::maintenance::MaintenanceConfig;
use fibra_core::result::AppResult;
use fibra_database::repositories::crm::CrmRepository;
use fibra_entity::module::Module;
use fibra_entity::user::Role;
use fibra_notify::Notifier;

use super::{MaintenanceTask, join_examples};

/// Records examined per scan.
const SCAN_LIMIT: i64 = 25;
/// Example names shown in the alert message.
const EXAMPLE_LIMIT: usize = 3;

/// Flags contacts with missing phone, contact method, or country.
#[derive(Debug)]
pub struct SalesDataQualityTask {
    crm: Arc<CrmRepository>,
    notifier: Arc<Notifier>,
    interval: Duration,
    dedupe_window: Duration,
}

impl SalesDataQualityTask {
    /// Creates the task from the maintenance configuration.
    pub fn new(
        crm: Arc<CrmRepository>,
        notifier: Arc<Notifier>,
        config: &MaintenanceConfig,
    ) -> Self {
        Self {
            crm,
            notifier,
            interval: config.quality_scan_interval(),
            dedupe_window: config.quality_dedupe_window(),
        }
    }
}

#[async_trait]
impl MaintenanceTask for SalesDataQualityTask {
    fn name(&self) -> &str {
        "sales_data_quality"
    }

    fn guard_key(&self, user_id: Uuid) -> String {
        format!("maintenance:quality:sales:{user_id}")
    }

    fn min_interval(&self) -> Duration {
        self.interval
    }

    fn enabled_for(&self, role: Role) -> bool {
        can_access(role, Module::Sales)
    }

    async fn run(&self, user_id: Uuid) -> AppResult<()> {
        let gaps = self.crm.find_incomplete_contacts(SCAN_LIMIT).await?;
        if gaps.is_empty() {
            return Ok(());
        }

        let examples = join_examples(gaps.iter().map(|c| c.short_name()), EXAMPLE_LIMIT);
        let message = if examples.is_empty() {
            format!("CRM: {} contact(s) with missing data.", gaps.len())
        } else {
            format!(
                "CRM: {} contact(s) with missing data (e.g. {examples}).",
                gaps.len()
            )
        };

        self.notifier
            .notify_user_once(
                user_id,
                "contact_data_missing",
                &message,
                Some(self.dedupe_window),
            )
            .await?;
        Ok(())
    }
}

/// Flags projects with no end date, no service type, or a non-positive budget.
#[derive(Debug)]
pub struct ProjectDataQualityTask {
    crm: Arc<CrmRepository>,
    notifier: Arc<Notifier>,
    interval: Duration,
    dedupe_window: Duration,
}

impl ProjectDataQualityTask {
    /// Creates the task from the maintenance configuration.
    pub fn new(
        crm: Arc<CrmRepository>,
        notifier: Arc<Notifier>,
        config: &MaintenanceConfig,
    ) -> Self {
        Self {
            crm,
            notifier,
            interval: config.quality_scan_interval(),
            dedupe_window: config.quality_dedupe_window(),
        }
    }
}

#[async_trait]
impl MaintenanceTask for ProjectDataQualityTask {
    fn name(&self) -> &str {
        "project_data_quality"
    }

    fn guard_key(&self, user_id: Uuid) -> String {
        format!("maintenance:quality:projects:{user_id}")
    }

    fn min_interval(&self) -> Duration {
        self.interval
    }

    fn enabled_for(&self, role: Role) -> bool {
        can_access(role, Module::Projects)
    }

    async fn run(&self, user_id: Uuid) -> AppResult<()> {
        let gaps = self.crm.find_incomplete_projects(SCAN_LIMIT).await?;
        if gaps.is_empty() {
            return Ok(());
        }

        let examples = join_examples(gaps.iter().map(|p| p.name.clone()), EXAMPLE_LIMIT);
        let message = if examples.is_empty() {
            format!("Projects: {} project(s) with missing data.", gaps.len())
        } else {
            format!(
                "Projects: {} project(s) with missing data (e.g. {examples}).",
                gaps.len()
            )
        };

        self.notifier
            .notify_user_once(
                user_id,
                "project_data_missing",
                &message,
                Some(self.dedupe_window),
            )
            .await?;
        Ok(())
    }
}
