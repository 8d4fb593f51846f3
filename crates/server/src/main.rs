use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamfinder_core::{
    cache_from_config, config::SearcherBackend, load_config, validate_config, JackettSearcher,
    MetadataClient, OmdbClient, Searcher, StreamPipeline,
};
use streamfinder_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
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

    // Determine config path
    let config_path = std::env::var("STREAMFINDER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!("Configuration loaded successfully");

    // Create searcher
    let searcher: Arc<dyn Searcher> = match config.searcher.backend {
        SearcherBackend::Jackett => {
            let jackett_config = config
                .searcher
                .jackett
                .clone()
                .context("searcher.jackett section is required")?;
            info!(
                "Initializing Jackett searcher at {} (indexer: {})",
                jackett_config.url, jackett_config.indexer
            );
            Arc::new(JackettSearcher::new(jackett_config).context("Failed to create Jackett searcher")?)
        }
    };

    let mut pipeline = StreamPipeline::new(searcher, config.pipeline.clone())
        .with_source_name(config.addon.name.clone())
        .with_cache(cache_from_config(&config.cache));

    // Metadata lookups are optional; without them ids resolve through the fallback table
    match &config.metadata {
        Some(metadata_config) => match OmdbClient::new(metadata_config.clone()) {
            Ok(client) => {
                info!("Initializing OMDb metadata client");
                if let Err(e) = client.validate_api_key().await {
                    warn!("OMDb API key check failed, lookups may fail: {}", e);
                }
                pipeline = pipeline.with_metadata(Arc::new(client) as Arc<dyn MetadataClient>);
            }
            Err(e) => warn!("Metadata client disabled: {}", e),
        },
        None => info!("Metadata lookups not configured"),
    }

    if config.cache.enabled {
        info!("Stream cache enabled (ttl: {}s)", config.cache.ttl_secs);
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(pipeline)));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);
    info!("Manifest: http://{}/manifest.json", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
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
