use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use menage_core::clock::{Clock, SystemClock};
use menage_core::completion::CompletionWorkflow;
use menage_core::db;
use menage_core::store::SqliteTaskStore;
use menage_core::sweeper::Sweeper;
use menage_core::visibility::VisibilityPolicy;

mod auth;
mod config;
mod error;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::new().context("failed to load configuration")?;

    let pool = db::establish_connection(&config.database_path)
        .await
        .context("failed to open database")?;

    let store = Arc::new(SqliteTaskStore::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = Arc::new(routes::AppState {
        store: Arc::clone(&store),
        visibility: VisibilityPolicy::new(Arc::clone(&store)),
        completion: CompletionWorkflow::new(Arc::clone(&store), Arc::clone(&clock)),
    });

    let sweeper = Sweeper::new(Arc::clone(&store), Arc::clone(&clock));
    let sweeper_handle = sweeper.spawn(Duration::from_secs(config.sweep.interval_secs));
    info!(interval_secs = config.sweep.interval_secs, "sweeper started");

    let app = routes::router(state, routes::cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(addr = %config.listen, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    sweeper_handle.shutdown().await;
    info!("shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
