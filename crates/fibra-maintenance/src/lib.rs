//! # fibra-maintenance
//!
//! Request-triggered background upkeep for Fibra Core.
//!
//! This crate provides:
//! - A process-wide task guard map enforcing per-key mutual exclusion and
//!   minimum-interval throttling
//! - A coordinator that selects tasks by the caller's module access and
//!   runs them concurrently
//! - The built-in upkeep tasks (data-quality scans, catalog seeding,
//!   invoice/milestone sync)

pub mod coordinator;
pub mod guard;
pub mod tasks;

pub use coordinator::{MaintenanceCoordinator, TaskResult};
pub use guard::TaskGuards;
pub use tasks::MaintenanceTask;
