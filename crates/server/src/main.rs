use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinefetch_core::{
    load_config, load_config_or_env, validate_config, Config, FileTitleSource, MetadataClient,
    OmdbClient, TitleSource,
};
use cinefetch_server::{api::create_router, state::AppState};

/// Config file read when `CINEFETCH_CONFIG` is not set; may be absent.
const DEFAULT_CONFIG_PATH: &str = "cinefetch.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // `.env` in the working directory; variables already set take precedence
    let dotenv_path = dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {:?}", path);
    }

    let config = read_config()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("OMDb base URL: {}", config.omdb.base_url);
    info!("Titles file: {:?}", config.titles.path);
    info!("Max concurrent lookups: {}", config.fetch.max_concurrent_lookups);

    let client: Arc<dyn MetadataClient> = Arc::new(
        OmdbClient::new(&config.omdb).context("Failed to create OMDb client")?,
    );
    let titles: Arc<dyn TitleSource> = Arc::new(FileTitleSource::new(config.titles.path.clone()));

    if !config.server.static_dir.is_dir() {
        info!(
            "Static directory {:?} not found; only API routes will respond",
            config.server.static_dir
        );
    }

    // Create app state
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, client, titles));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Now listening on port {}", addr.port());

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    Ok(())
}

/// Load from `CINEFETCH_CONFIG` if set (the file must exist), otherwise from
/// the default path if present. Environment overrides apply either way.
fn read_config() -> Result<Config> {
    match std::env::var("CINEFETCH_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            info!("Loading configuration from {:?} and environment", path);
            load_config_or_env(&path).context("Failed to load configuration")
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
