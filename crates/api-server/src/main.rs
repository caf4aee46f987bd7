//! API Server for the task tracker
//!
//! Serves the JSON API under `/api` and the HTML UI on the same port.

mod config;
mod error;
mod routes;
mod state;
mod templates;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_server=debug,tt_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    tracing::info!(
        "Using {} storage at {:?} (testing: {})",
        config.storage.kind(),
        config.storage.path(),
        config.testing
    );

    let app_state = AppState::new(&config).await?;
    let app = routes::router(app_state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
