//! Yatter binary entry point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yatter::{AppState, config};

/// Application entry point
///
/// # Setup
/// 1. Load configuration from file and environment
/// 2. Initialize tracing/logging from the `logging` section
/// 3. Register metrics
/// 4. Initialize AppState
/// 5. Build Axum router
/// 6. Start HTTP server
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration
    let config = config::AppConfig::load()?;

    // 2. Initialize tracing/logging; RUST_LOG still wins when set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        backend = ?config.database.backend,
        level = %config.logging.level,
        "Starting Yatter..."
    );

    // 3. Initialize metrics
    yatter::metrics::init_metrics()?;

    // 4. Initialize application state
    let state = AppState::new(&config).await?;

    // 5. Build Axum router
    let app = yatter::build_router(state);

    // 6. Start HTTP server
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
