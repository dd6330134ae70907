//! Design Storage Server — application entry point.

use std::sync::Arc;

use anyhow::Context;
use design_storage_auth::{ClaimVerifier, DesignService};
use design_storage_db::DbManager;
use design_storage_server::{ServerConfig, router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("design_storage=info")),
        )
        .json()
        .init();

    tracing::info!("Starting design storage server...");

    let config = ServerConfig::from_env().context("failed to load configuration")?;

    let verifier =
        ClaimVerifier::from_config(&config.auth).context("failed to load JWT public key")?;

    let store = DbManager::connect(&config.db)
        .await
        .context("failed to open design store")?;
    let app = router(Arc::new(DesignService::new(store.repository(), verifier)));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .context("failed to bind listener")?;

    tracing::info!(addr = %config.listen_addr, "Design storage HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Design storage server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
