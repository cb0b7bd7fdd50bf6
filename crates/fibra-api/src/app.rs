//! Application builder — wires repositories, services, router, and state
//! into a running Axum server.

use std::sync::Arc;

use sqlx::PgPool;

use fibra_auth::gate::AuthGate;
use fibra_auth::session::SessionIdentityResolver;
use fibra_core::config::FibraConfig;
use fibra_core::error::AppError;
use fibra_database::repositories::billing::BillingRepository;
use fibra_database::repositories::catalog::CatalogRepository;
use fibra_database::repositories::crm::CrmRepository;
use fibra_database::repositories::notification::NotificationRepository;
use fibra_database::repositories::session::SessionRepository;
use fibra_database::repositories::user::UserRepository;
use fibra_maintenance::coordinator::MaintenanceCoordinator;
use fibra_maintenance::guard::TaskGuards;
use fibra_maintenance::tasks::{
    DefaultBanksTask, DefaultServicesTask, InvoiceMilestoneSyncTask, ProjectDataQualityTask,
    SalesDataQualityTask,
};
use fibra_notify::email::BrevoMailer;
use fibra_notify::fanout::Notifier;
use fibra_notify::store::{NotificationStore, UserDirectory};

use crate::router::build_router;
use crate::state::AppState;

/// Build the full application state from configuration and a database pool.
pub fn build_state(config: FibraConfig, db_pool: PgPool) -> Result<AppState, AppError> {
    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
    let session_repo = Arc::new(SessionRepository::new(db_pool.clone()));
    let crm_repo = Arc::new(CrmRepository::new(db_pool.clone()));
    let catalog_repo = Arc::new(CatalogRepository::new(db_pool.clone()));
    let billing_repo = Arc::new(BillingRepository::new(db_pool.clone()));

    // ── Auth ─────────────────────────────────────────────────────
    let resolver = Arc::new(SessionIdentityResolver::new(Arc::clone(&session_repo)));
    let auth_gate = AuthGate::new(resolver);

    // ── Notification fan-out ─────────────────────────────────────
    let mailer = Arc::new(BrevoMailer::new(&config.notifications)?);
    let notifier = Arc::new(Notifier::new(
        Arc::clone(&notification_repo) as Arc<dyn NotificationStore>,
        Arc::clone(&user_repo) as Arc<dyn UserDirectory>,
        mailer,
        config.notifications.clone(),
    ));

    // ── Maintenance ──────────────────────────────────────────────
    let guards = Arc::new(TaskGuards::new());
    let mut coordinator = MaintenanceCoordinator::new(guards);
    coordinator
        .register(Arc::new(DefaultServicesTask::new(
            Arc::clone(&catalog_repo),
            &config.maintenance,
        )))
        .register(Arc::new(DefaultBanksTask::new(
            Arc::clone(&catalog_repo),
            &config.maintenance,
        )))
        .register(Arc::new(SalesDataQualityTask::new(
            Arc::clone(&crm_repo),
            Arc::clone(&notifier),
            &config.maintenance,
        )))
        .register(Arc::new(ProjectDataQualityTask::new(
            Arc::clone(&crm_repo),
            Arc::clone(&notifier),
            &config.maintenance,
        )))
        .register(Arc::new(InvoiceMilestoneSyncTask::new(
            Arc::clone(&billing_repo),
            Arc::clone(&notifier),
            &config.maintenance,
        )));

    Ok(AppState {
        config: Arc::new(config),
        db_pool,
        auth_gate,
        notifier,
        notification_repo,
        coordinator: Arc::new(coordinator),
    })
}

/// Run the Fibra Core server with the given configuration and pool.
pub async fn run_server(config: FibraConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting Fibra Core server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config, db_pool)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Fibra Core server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
