//! FileSync relay server
//!
//! Main entry point: validates provider credentials, then serves the API.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use filesync_api::{AppState, create_router};
use filesync_core::files::FileService;
use filesync_core::provider::{ImageKitClient, MediaProvider};
use filesync_shared::AppConfig;

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "filesync=debug,filesync_api=debug,filesync_core=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}

/// Validates provider credentials and assembles the shared state.
fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let credentials = config.imagekit.credentials().map_err(|missing| {
        error!(missing = ?missing.0, "Provider credentials are not configured");
        missing
    })?;

    let provider = ImageKitClient::new(&credentials)?;
    info!(
        provider = provider.name(),
        url_endpoint = %credentials.url_endpoint,
        "Storage provider configured"
    );

    Ok(AppState {
        files: FileService::new(Arc::new(provider)),
        credentials: config.credential_status(),
        max_file_size: config.upload.max_file_size,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Refuse to start without provider credentials
    let state = build_state(&config)?;

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(
        max_file_size = config.upload.max_file_size,
        "Server listening on {}", addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
