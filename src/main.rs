//! Volatility Alert Engine - Main Entry Point
//!
//! Serves the WebSocket boundary for the tick gateway and runs the
//! per-symbol rolling-window alert engine behind it.

use vol_alert_engine::*;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("📡 Volatility Alert Engine v0.3.0");
    info!("📋 Configuration:");
    info!("   Bind: {}:{}", config.bind, config.port);
    info!("   Window: {}s", config.window_secs);
    info!("   Alert cooldown: {}s", config.cooldown_secs);
    info!(
        "   Thresholds: EXPLOSIVE ≥ {}% | HOT ≥ {}% | LOW < {}% | STAGNANT < {}%",
        config::EXPLOSIVE_THRESHOLD_PCT,
        config::HOT_THRESHOLD_PCT,
        config::LOW_THRESHOLD_PCT,
        config::STAGNANT_RANGE_PCT
    );

    let state = Arc::new(server::AppState::new(&config));
    let app = server::router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| EngineError::Config {
            context: format!("invalid bind address {}:{}", config.bind, config.port),
            source: anyhow::Error::new(e),
        })?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        EngineError::Transport {
            message: format!("failed to bind {addr}"),
            source: Some(anyhow::Error::new(e)),
        }
    })?;

    info!("✅ Signal engine listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("\n📛 Received shutdown signal (Ctrl+C)...");
}
