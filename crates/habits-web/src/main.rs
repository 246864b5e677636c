//! habits-web - browser front-end for the habit tracker.

mod routes;
mod views;

use std::sync::Arc;

use clap::Parser;
use habits_core::storage::StorageBackend;
use habits_core::Config;
use tracing::info;

use crate::routes::{create_router, AppState};

#[derive(Parser)]
#[command(name = "habits-web", version, about = "Habit tracker web interface")]
struct Args {
    /// Address to listen on (overrides config file)
    #[arg(long, env = "HABITS_BIND")]
    bind: Option<String>,

    /// Storage backend (overrides config file)
    #[arg(long, env = "HABITS_BACKEND")]
    backend: Option<StorageBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("habits_web=info,habits_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(backend) = args.backend {
        config.storage.override_backend(backend);
    }

    info!(backend = ?config.storage.backend, "opening habit store");
    let tracker = habits_core::tracker_from_config(&config)?;
    let app = create_router(Arc::new(AppState::new(tracker)));

    let listener = tokio::net::TcpListener::bind(config.server.bind.as_str()).await?;
    info!("started habit service on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("habit service stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
