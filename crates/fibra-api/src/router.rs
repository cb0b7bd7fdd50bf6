//! Route definitions for the Fibra Core HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(maintenance_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Notification list, unread summary, and read-state transitions.
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/summary",
            get(handlers::notification::unread_summary),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
}

/// Maintenance kickoff.
fn maintenance_routes() -> Router<AppState> {
    Router::new().route("/maintenance/kickoff", post(handlers::maintenance::kickoff))
}

/// Liveness.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
