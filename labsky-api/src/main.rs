use std::net::SocketAddr;

use anyhow::Context;
use labsky_api::{app, ApiMetrics, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labsky_api=debug,labsky_core=info,labsky_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = labsky_store::Config::load().context("Failed to load config")?;
    tracing::info!("Starting LabSky check-in API on port {}", config.server.port);

    let repo = labsky_store::open_repository(&config)
        .await
        .context("Failed to open passenger store")?;
    let metrics = ApiMetrics::new().context("Failed to register metrics")?;

    let app = app(AppState::new(repo, metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
