mod config;
mod content;
mod error;
mod handlers;
mod models;
mod request_context;
mod routes;
mod services;
mod state;
mod store;

use anyhow::Result;
use mdpress_runtime::{init_logging, LoggingOptions};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(
        &LoggingOptions::new("mdpress-backend").with_log_dir(config.log_dir.clone()),
    )?;

    tracing::info!("Starting mdpress backend server");
    tracing::info!("Site root: {}", config.site_root.display());
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!(
        "Static files: {} -> {}",
        config.static_prefix,
        config.static_dir.display()
    );

    let addr = config.listen_addr();
    let app_state = state::AppState::new(config);
    app_state.store().warm_up().await;

    // Build router
    let app = routes::create_router(app_state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
