mod catalog;
mod config;
mod errors;
mod evaluation;
mod interview;
mod matching;
mod models;
mod routes;
mod state;
mod tools;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Counsel API v{}", env!("CARGO_PKG_VERSION"));

    // Catalog is loaded before the listener starts and never mutated afterwards
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => {
            let catalog = Catalog::embedded()?;
            info!("Loaded {} programs from embedded catalog", catalog.len());
            catalog
        }
    };

    if catalog.is_empty() {
        warn!("Catalog is empty; program search will return no results");
    }

    let scorer = config.similarity_backend.scorer();
    info!(
        "Similarity backend: {}",
        config.similarity_backend.as_str()
    );

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the counseling web app

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
