//! mapgal-gv (Gallery Viewer) - Main entry point
//!
//! Loads the map dataset once at startup and serves a filterable gallery
//! page. If the dataset cannot be fetched the page stays empty until the
//! service is restarted.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapgal_common::config::{CliOverrides, GalleryConfig};
use mapgal_common::{GalleryController, GallerySession, ViewSnapshot};
use mapgal_gv::{build_router, load_dataset, AppState, ImageMount};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mapgal-gv
#[derive(Parser, Debug)]
#[command(name = "mapgal-gv")]
#[command(about = "Filterable map image gallery")]
#[command(version)]
struct Args {
    /// Path to config.toml
    #[arg(short, long, env = "MAPGAL_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset file path or http(s) URL
    #[arg(short, long, env = "MAPGAL_DATASET")]
    dataset: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "MAPGAL_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "MAPGAL_BIND")]
    bind: Option<String>,

    /// Directory of thumbnail images
    #[arg(short, long, env = "MAPGAL_IMAGE_DIR")]
    image_dir: Option<PathBuf>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            config: args.config,
            dataset: args.dataset,
            port: args.port,
            bind: args.bind,
            image_dir: args.image_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so its log level can seed the subscriber
    let args = Args::parse();
    let config = GalleryConfig::load(args.into()).context("Failed to load configuration")?;

    // Initialize tracing; RUST_LOG overrides the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "mapgal_gv={0},mapgal_common={0},tower_http={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Map Gallery Viewer (mapgal-gv) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config.config_file {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No config file found, using defaults"),
    }
    info!("Dataset: {}", config.dataset);

    let images = match (&config.image_dir, config.image_route()) {
        (Some(dir), Some(route)) => {
            info!("Serving images from {} at {}", dir.display(), route);
            Some(ImageMount {
                route,
                dir: dir.clone(),
            })
        }
        (Some(dir), None) => {
            warn!(
                "image_dir {} ignored: image prefix '{}' is not a local path",
                dir.display(),
                config.locator.prefix
            );
            None
        }
        (None, _) => None,
    };

    let session = GallerySession::new(config.filter_order.clone(), config.locator.clone());
    let controller = GalleryController::attach(session, ViewSnapshot::default())
        .context("Failed to attach gallery")?;
    let state = AppState::new(controller, images);

    // The one asynchronous step: fetch and load the dataset
    let loader_state = state.clone();
    let source = config.dataset.clone();
    tokio::spawn(async move {
        if let Err(e) = load_dataset(&loader_state, &source).await {
            error!("Failed to load dataset from {}: {}", source, e);
            error!("Gallery will stay empty until restart");
        }
    });

    let app = build_router(state);

    let ip = config
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.bind))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mapgal-gv listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
