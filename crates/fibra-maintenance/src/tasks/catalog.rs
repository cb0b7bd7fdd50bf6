//! Default-catalog seeding tasks.
//!
//! Both tasks are global: one seed run serves every user, so the guard
//! key carries no user id.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use fibra_auth::rbac::can_access;
use fibra_core::config::maintenance::MaintenanceConfig;
use fibra_core::result::AppResult;
use fibra_database::repositories::catalog::CatalogRepository;
use fibra_entity::module::Module;
use fibra_entity::user::Role;

use super::MaintenanceTask;

/// Seeds the default service catalog.
#[derive(Debug)]
pub struct DefaultServicesTask {
    catalog: Arc<CatalogRepository>,
    interval: Duration,
}

impl DefaultServicesTask {
    /// Creates the task from the maintenance configuration.
    pub fn new(catalog: Arc<CatalogRepository>, config: &MaintenanceConfig) -> Self {
        Self {
            catalog,
            interval: config.catalog_seed_interval(),
        }
    }
}

#[async_trait]
impl MaintenanceTask for DefaultServicesTask {
    fn name(&self) -> &str {
        "seed_default_services"
    }

    fn guard_key(&self, _user_id: Uuid) -> String {
        "maintenance:default-services".to_string()
    }

    fn min_interval(&self) -> Duration {
        self.interval
    }

    fn enabled_for(&self, role: Role) -> bool {
        can_access(role, Module::Marketing) || can_access(role, Module::Projects)
    }

    async fn run(&self, _user_id: Uuid) -> AppResult<()> {
        let seeded = self.catalog.seed_default_services().await?;
        if seeded > 0 {
            info!(seeded, "Default services seeded");
        }
        Ok(())
    }
}

/// Seeds the default accounting banks.
#[derive(Debug)]
pub struct DefaultBanksTask {
    catalog: Arc<CatalogRepository>,
    interval: Duration,
}

impl DefaultBanksTask {
    /// Creates the task from the maintenance configuration.
    pub fn new(catalog: Arc<CatalogRepository>, config: &MaintenanceConfig) -> Self {
        Self {
            catalog,
            interval: config.catalog_seed_interval(),
        }
    }
}

#[async_trait]
impl MaintenanceTask for DefaultBanksTask {
    fn name(&self) -> &str {
        "seed_default_banks"
    }

    fn guard_key(&self, _user_id: Uuid) -> String {
        "maintenance:default-banks".to_string()
    }

    fn min_interval(&self) -> Duration {
        self.interval
    }

    fn enabled_for(&self, role: Role) -> bool {
        can_access(role, Module::Accounting) || can_access(role, Module::Settings)
    }

    async fn run(&self, _user_id: Uuid) -> AppResult<()> {
        let seeded = self.catalog.seed_default_banks().await?;
        if seeded > 0 {
            info!(seeded, "Default banks seeded");
        }
        Ok(())
    }
}
