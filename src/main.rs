//! FoodBag Server: surplus-food marketplace reservations.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use foodbag_api::{AppState, build_router};
use foodbag_core::config::AppConfig;
use foodbag_core::error::AppError;
use foodbag_database::Stores;
use foodbag_worker::ReaperScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("FOODBAG_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
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
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FoodBag v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage (+ migrations) ───────────────────────────
    tracing::info!(provider = ?config.database.provider, "Connecting storage...");
    let stores = Stores::connect(&config.database).await?;

    // ── Step 2: Services ─────────────────────────────────────────
    let bind_address = config.server.bind_address();
    let bootstrap = config.bootstrap.clone();
    let reaper_config = config.reaper.clone();
    let state = AppState::build(config, stores.clone())?;

    // ── Step 3: Bootstrap administrator ──────────────────────────
    if bootstrap.seed_admin {
        let created = state
            .user_service
            .seed_admin(&bootstrap.admin_email, &bootstrap.admin_password)
            .await?;
        if created {
            tracing::warn!(
                email = %bootstrap.admin_email,
                "Default administrator created; change its password"
            );
        }
    }

    // ── Step 4: Expiry reaper ────────────────────────────────────
    let mut scheduler = ReaperScheduler::new(Arc::clone(&state.reaper), reaper_config).await?;
    scheduler.start().await?;

    // ── Step 5: HTTP server ──────────────────────────────────────
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {bind_address}: {e}")))?;
    tracing::info!("Listening on http://{}", bind_address);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    // ── Step 6: Teardown ─────────────────────────────────────────
    tracing::info!("Shutting down...");
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!(error = %e, "Reaper scheduler did not stop cleanly");
    }
    stores.close().await;
    tracing::info!("Shutdown complete");

    served
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
