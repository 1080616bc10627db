#![allow(clippy::doc_markdown)]
//! Recolite Server - product search and recommendations over HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use recolite_core::RecoliteConfig;
use recolite_server::{build_router, AppState};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Recolite Server - TF-IDF product recommendations
#[derive(Parser, Debug)]
#[command(name = "recolite-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./recolite.toml when present)
    #[arg(short, long, env = "RECOLITE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the product and category CSV files
    #[arg(short, long, env = "RECOLITE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "RECOLITE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RECOLITE_PORT")]
    port: Option<u16>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut RecoliteConfig) {
        if let Some(dir) = &self.data_dir {
            config.data.dir.clone_from(dir);
        }
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Build CORS layer from the configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        tracing::warn!("CORS: permissive (dev mode). Set server.cors_origins to restrict origins.");
        return CorsLayer::permissive();
    }

    use tower_http::cors::AllowOrigin;
    let origin_list: Vec<_> = origins
        .iter()
        .filter_map(|o| o.trim().parse().ok())
        .collect();
    tracing::info!("CORS: restricted to {} origin(s)", origin_list.len());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origin_list))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = RecoliteConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recolite server...");
    tracing::info!("Data directory: {}", config.data.dir.display());

    let state = Arc::new(AppState::from_config(&config));

    // A failed startup build is retried lazily by the first request.
    let store = Arc::clone(&state.store);
    match tokio::task::spawn_blocking(move || store.reload()).await? {
        Ok(snapshot) => tracing::info!(
            products = snapshot.len(),
            unmatched = snapshot.report().unmatched,
            incomplete = snapshot.report().incomplete,
            "Catalog ready"
        ),
        Err(e) => tracing::error!(error = %e, "Initial catalog build failed"),
    }

    let app = build_router(state)
        .layer(build_cors_layer(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Recolite server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
