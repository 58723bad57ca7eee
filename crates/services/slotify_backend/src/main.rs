// File: services/slotify_backend/src/main.rs
use slotify_backend::{build_app, AppState};
use slotify_common::{configure_error_details, init_from_config};
use slotify_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);

    // Hold the guard so the file writer flushes on exit
    let _log_guard = init_from_config(&config.logging.clone().unwrap_or_default());
    configure_error_details(config.is_production());

    let state = AppState::new(config.clone()).await?;
    let app = build_app(&state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
