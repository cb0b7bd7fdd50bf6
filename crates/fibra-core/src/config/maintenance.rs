//! Background maintenance throttling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum re-execution intervals for the maintenance tasks.
///
/// These are configuration constants, not derived values. The data-quality
/// scans additionally use their own notification dedup window so that the
/// same nagging alert is not repeated more than once per window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// Minimum interval between data-quality scans, in minutes.
    #[serde(default = "default_quality_scan_interval")]
    pub quality_scan_interval_minutes: u64,
    /// Minimum interval between invoice/milestone syncs, in minutes.
    #[serde(default = "default_invoice_sync_interval")]
    pub invoice_sync_interval_minutes: u64,
    /// Minimum interval between default-catalog seed runs, in minutes.
    #[serde(default = "default_catalog_seed_interval")]
    pub catalog_seed_interval_minutes: u64,
    /// Dedup window in hours for data-quality notifications.
    #[serde(default = "default_quality_dedupe")]
    pub quality_dedupe_hours: u64,
}

impl MaintenanceConfig {
    /// Data-quality scan interval as a `Duration`.
    pub fn quality_scan_interval(&self) -> Duration {
        Duration::from_secs(self.quality_scan_interval_minutes * 60)
    }

    /// Invoice sync interval as a `Duration`.
    pub fn invoice_sync_interval(&self) -> Duration {
        Duration::from_secs(self.invoice_sync_interval_minutes * 60)
    }

    /// Catalog seed interval as a `Duration`.
    pub fn catalog_seed_interval(&self) -> Duration {
        Duration::from_secs(self.catalog_seed_interval_minutes * 60)
    }

    /// Data-quality notification dedup window as a `Duration`.
    pub fn quality_dedupe_window(&self) -> Duration {
        Duration::from_secs(self.quality_dedupe_hours * 3600)
    }
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            quality_scan_interval_minutes: default_quality_scan_interval(),
            invoice_sync_interval_minutes: default_invoice_sync_interval(),
            catalog_seed_interval_minutes: default_catalog_seed_interval(),
            quality_dedupe_hours: default_quality_dedupe(),
        }
    }
}

fn default_quality_scan_interval() -> u64 {
    20
}

fn default_invoice_sync_interval() -> u64 {
    15
}

fn default_catalog_seed_interval() -> u64 {
    30
}

fn default_quality_dedupe() -> u64 {
    8
}
