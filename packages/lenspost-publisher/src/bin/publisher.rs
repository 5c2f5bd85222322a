//! lenspost publisher binary.

use std::sync::Arc;

use lenspost_publisher::{create_router, AppState, Config};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting lenspost publisher");

    // Parsing errors fail hard; a missing file already falls back to defaults.
    let config = Config::load().unwrap_or_else(|e| {
        error!(error = %e, "FATAL: Config error: fix env vars or publisher.toml");
        std::process::exit(1);
    });

    if config.api_key.is_some() {
        info!("API key auth enabled");
    } else {
        warn!("PUBLISHER_API_KEY not set, /publications is unprotected (dev mode)");
    }

    info!(
        app_id = %config.app_id,
        lens_api = %config.lens_api_url,
        storage = %config.storage_upload_url,
        timeout_ms = config.request_timeout_ms,
        "Configuration loaded"
    );

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    info!(address = %bind_address, "Listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Publisher shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
