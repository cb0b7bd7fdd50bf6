//! Maintenance task trait and built-in implementations.

pub mod catalog;
pub mod invoice_sync;
pub mod quality;

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use fibra_core::result::AppResult;
use fibra_entity::user::Role;

pub use catalog::{DefaultBanksTask, DefaultServicesTask};
pub use invoice_sync::InvoiceMilestoneSyncTask;
pub use quality::{ProjectDataQualityTask, SalesDataQualityTask};

/// An idempotent upkeep task run by the coordinator.
#[async_trait]
pub trait MaintenanceTask: Send + Sync + std::fmt::Debug {
    /// Stable task name reported in results.
    fn name(&self) -> &str;

    /// The guard key for this invocation.
    ///
    /// Per-user tasks embed the user id so that different users throttle
    /// independently; global tasks return a fixed key shared by everyone.
    fn guard_key(&self, user_id: Uuid) -> String;

    /// Minimum interval between attempts for one key.
    fn min_interval(&self) -> Duration;

    /// Whether the task applies to a caller with this role.
    fn enabled_for(&self, role: Role) -> bool;

    /// Execute the task body.
    async fn run(&self, user_id: Uuid) -> AppResult<()>;
}

/// Join up to `max` unique non-empty values for an example list.
pub(crate) fn join_examples(values: impl IntoIterator<Item = String>, max: usize) -> String {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !unique.contains(&value) {
            unique.push(value);
        }
        if unique.len() == max {
            break;
        }
    }
    unique.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_examples_dedupes_and_caps() {
        let values = vec![
            "Ana".to_string(),
            "".to_string(),
            "Ana".to_string(),
            "Bob".to_string(),
            "Carla".to_string(),
            "Dan".to_string(),
        ];
        assert_eq!(join_examples(values, 3), "Ana, Bob, Carla");
    }
}
