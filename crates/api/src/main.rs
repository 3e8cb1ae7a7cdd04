use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use stocksense_api::app::{self, AppState};
use stocksense_infra::{AppConfig, HttpPredictionProvider, InventoryStore, RefreshScheduler};
use stocksense_inventory::SeedCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocksense_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let catalog = SeedCatalog::baseline(Utc::now().date_naive()).context("invalid seed catalog")?;
    let (snapshot, baseline_insights, history) = catalog.into_parts();
    let store = Arc::new(InventoryStore::new(snapshot));

    let provider = HttpPredictionProvider::new(config.inference.clone())
        .context("failed to build inference client")?;
    tracing::info!(endpoint = provider.endpoint(), "inference provider configured");

    let mut scheduler = RefreshScheduler::new(
        config.refresh.clone(),
        store,
        Arc::new(provider),
        history,
        baseline_insights,
    )?;
    scheduler.start()?;

    let state = Arc::new(AppState::new(scheduler));
    let router = app::build_app(state.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
