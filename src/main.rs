//! Shiptivity client registry API.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3001`)
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DATABASE_URL`: SQLite URL (default: `sqlite://clients.db`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
//! - `SEED_FILE`: JSON array of clients for the in-memory store
//! - `LOG_FORMAT`: `text` (default) | `json`
//! - `RUST_LOG`: Logging filter (e.g., `debug`, `shiptivity_api=debug`)

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shiptivity_api::api::{AppState, create_router};
use shiptivity_api::infrastructure::{AppConfig, LogFormat, RepositoryFactory};

const DEFAULT_LOG_FILTER: &str = "shiptivity_api=debug,tower_http=debug,info";

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();
    let log_format = config
        .as_ref()
        .map_or(LogFormat::default(), |config| config.log_format);
    init_tracing(log_format);

    let config = match config {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "Configuration error");
            std::process::exit(1);
        }
    };

    tracing::info!(
        storage_mode = ?config.repository.storage_mode,
        address = %config.bind_address(),
        "Starting Shiptivity API"
    );

    let repository = match RepositoryFactory::new(config.repository.clone()).create().await {
        Ok(repository) => repository,
        Err(error) => {
            tracing::error!(%error, "Failed to open client store");
            std::process::exit(1);
        }
    };

    let application = create_router(AppState::new(repository.clone()));

    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "Failed to bind to address {}", config.bind_address());
            repository.close().await;
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    let served = axum::serve(listener, application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    repository.close().await;

    if let Err(error) = served {
        tracing::error!(%error, "Server error");
        std::process::exit(1);
    }
    tracing::info!("Server shutdown complete");
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Completes on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
