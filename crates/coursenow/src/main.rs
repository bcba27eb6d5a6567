use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coursenow::config::ServerConfig;
use coursenow::server::create_router;
use coursenow::types::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursenow=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // The only argument is an optional path to a JSON config file.
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = ServerConfig::load(config_path.as_deref())
        .map_err(|e| anyhow!("Failed to load configuration: {e}"))?;

    info!(
        "Serving courses from {} (file timeout {}ms)",
        config.courses_dir.display(),
        config.file_timeout_ms
    );

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;

    let app = create_router(Arc::new(ServerState::new(config)));

    info!("Server is running on http://{address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
