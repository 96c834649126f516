//! Linkpage - link-in-bio profile service
//!
//! Main entry point for the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use linkpage_api::utils::logging::init_tracing;
use linkpage_api::{build_router, AppContext};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before config so its variables take part in config loading
    let dotenv = dotenvy::dotenv();

    let config = linkpage_infra::config::load().context("failed to load configuration")?;
    init_tracing(config.server.log_json);

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }

    info!("Linkpage starting...");
    let bind_address = config.server.bind_address.clone();
    let ctx = Arc::new(AppContext::new_with_config(config).context("failed to initialise context")?);
    let app = build_router(ctx);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    info!(address = %bind_address, "server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await.context("server error")?;

    info!("Linkpage shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
