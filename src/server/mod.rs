//! HTTP service startup

pub mod db;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::api::http::http_router;
use crate::config::ServeConfig;
use crate::phrase::{CorpusProvider, PeriodSelector};
use crate::state::{AppState, SystemClock};

/// Resolve the corpus, build the router and serve until Ctrl-C
pub async fn serve(config: ServeConfig) -> Result<()> {
    let corpus = Arc::new(CorpusProvider::open(&config.database_url, &config.phrases_file).await);
    let selector = PeriodSelector::new(corpus, config.rotations);

    info!(
        rotations_per_day = config.rotations.get(),
        minutes_per_period = config.rotations.minutes_per_period(),
        source = selector.corpus().source_name(),
        "Phrase selector configured"
    );

    let state = Arc::new(AppState::new(selector, config.feed, Arc::new(SystemClock)));
    let app = http_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
