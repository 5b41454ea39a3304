//! Inventory Insights - HTTP server entry point.
//!
//! Loads configuration, wires the dataset store and summary sink, and serves
//! the inventory API until interrupted.

use std::sync::Arc;

use anyhow::Result;
use inventory_insights::adapters::{
    api_router, FileSummarySink, InMemoryDatasetStore, InMemorySummarySink, InventoryAppState,
};
use inventory_insights::config::{AppConfig, SummarySinkKind};
use inventory_insights::ports::SummarySink;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))?;
    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;
    info!(
        environment = ?config.server.environment,
        abc_a = config.analytics.abc_a_threshold,
        abc_b = config.analytics.abc_b_threshold,
        "Configuration loaded successfully"
    );

    let settings = config.analytics.settings()?;
    let summary_sink: Arc<dyn SummarySink> = match config.storage.summary_sink {
        SummarySinkKind::File => {
            info!(path = %config.storage.reports_path.display(), "Publishing run summaries to disk");
            Arc::new(FileSummarySink::new(&config.storage.reports_path))
        }
        SummarySinkKind::Memory => Arc::new(InMemorySummarySink::new()),
    };
    let state = InventoryAppState::new(Arc::new(InMemoryDatasetStore::new()), summary_sink, settings);

    let app = api_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
