//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use fibra_auth::gate::AuthGate;
use fibra_core::config::FibraConfig;
use fibra_database::repositories::notification::NotificationRepository;
use fibra_maintenance::coordinator::MaintenanceCoordinator;
use fibra_notify::fanout::Notifier;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<FibraConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Authorization gate.
    pub auth_gate: AuthGate,
    /// Notification fan-out service.
    pub notifier: Arc<Notifier>,
    /// Notification repository (read side: lists, read-state transitions).
    pub notification_repo: Arc<NotificationRepository>,
    /// Maintenance coordinator.
    pub coordinator: Arc<MaintenanceCoordinator>,
}
