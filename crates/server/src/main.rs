use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pahescope_core::{
    load_config, validate_config, ChromiumRenderer, Config, ResolutionOrchestrator,
};

use pahescope_server::api::create_router;
use pahescope_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; an explicit path must exist, the default path
    // may be absent (defaults apply).
    let config = match std::env::var("PAHESCOPE_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => {
            let path = PathBuf::from("config.toml");
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                info!("No config file, using defaults");
                Config::default()
            }
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!("Catalog source: {}", config.source.base_url);
    info!(
        "Browser: headless={}, max_sessions={}",
        config.browser.headless, config.browser.max_sessions
    );

    // Create the rendering collaborator and the orchestrator
    let renderer = Arc::new(ChromiumRenderer::new(config.browser.clone()));
    let orchestrator = ResolutionOrchestrator::new(renderer, config.clone());

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), orchestrator));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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
