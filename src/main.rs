//! Fibra Core — internal business-management platform for a branding studio.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use fibra_core::config::FibraConfig;
use fibra_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
fn load_configuration() -> Result<FibraConfig, AppError> {
    let env = std::env::var("FIBRA_ENV").unwrap_or_else(|_| "development".to_string());
    FibraConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &FibraConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).init();
        }
    }
}

/// Connect to the database, run migrations, and serve.
async fn run(config: FibraConfig) -> Result<(), AppError> {
    let pool = fibra_database::DatabasePool::connect(&config.database).await?;
    fibra_database::migration::run_migrations(pool.pool()).await?;

    fibra_api::run_server(config, pool.into_pool()).await
}
