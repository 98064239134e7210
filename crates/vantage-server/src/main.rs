//! Vantage Server — Application entry point.
//!
//! Bootstraps logging and storage. The HTTP/WebSocket surface that
//! mounts the per-entity access services is owned by a separate layer.

use tracing_subscriber::EnvFilter;
use vantage_db::{DbConfig, DbManager};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vantage=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting Vantage server...");

    let config = DbConfig::from_env();
    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(err) => {
            tracing::error!(error = %err, "failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(err) = vantage_db::run_migrations(manager.client()).await {
        tracing::error!(error = %err, "migrations failed");
        std::process::exit(1);
    }

    tracing::info!("Storage ready");

    // TODO: mount the HTTP router once the API layer lands.

    tracing::info!("Vantage server stopped.");
}
