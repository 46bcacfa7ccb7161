//! DocRoom Server — Secure Tokenized Content Delivery
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use docroom_api::AppState;
use docroom_client::HttpDeliveryBackend;
use docroom_core::config::AppConfig;
use docroom_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DOCROOM_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocRoom v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Backend client ───────────────────────────────────
    tracing::info!(base_url = %config.backend.base_url, "Initializing backend client...");
    let backend = Arc::new(HttpDeliveryBackend::new(&config.backend)?);

    // ── Step 2: Services and shared state ────────────────────────
    let state = AppState::build(config.clone(), backend);
    tracing::info!("Services initialized");

    // ── Step 3: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 4: Optional cache/session sweep ─────────────────────
    let sweep_handle = if config.delivery.sweep_interval_seconds > 0 {
        let interval = std::time::Duration::from_secs(config.delivery.sweep_interval_seconds);
        let url_cache = Arc::clone(&state.url_cache);
        let sessions = Arc::clone(&state.sessions);
        let mut cancel = shutdown_rx.clone();

        tracing::info!(interval_seconds = interval.as_secs(), "Starting sweep task");
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // the first tick fires immediately
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let urls = url_cache.purge_expired();
                        let idle = sessions.purge_expired();
                        tracing::debug!(urls, idle, "Sweep pass complete");
                    }
                    _ = cancel.changed() => break,
                }
            }
        }))
    } else {
        tracing::info!("Sweep disabled; stale entries expire passively on read");
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = docroom_api::build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DocRoom server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    if let Some(handle) = sweep_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(10), handle).await;
    }

    tracing::info!("DocRoom server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
