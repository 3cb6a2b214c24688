//! promsim server
//!
//! Demo service for alerting pipelines:
//! - Prometheus metrics on /metrics
//! - Health on /health
//! - Alertmanager webhook sink on /webhook
//! - Scenario triggers on /simulate/:scenario

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promsim_core::{Result, DemoError, Scenario};
use promsim_server::{app_state, config, router, sampler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "promsim exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load_or_default(config::DEFAULT_PATH)?;
    let listen = cfg.server.listen_addr()?;
    let sample_every = cfg.sampler.interval();

    let state = app_state::AppState::new(cfg);
    let sampler = sampler::spawn(state.metrics(), sample_every);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| DemoError::Internal(format!("bind {listen} failed: {e}")))?;

    tracing::info!(%listen, "promsim starting");
    tracing::info!(
        metrics = "/metrics",
        health = "/health",
        webhook = "/webhook",
        scenarios = ?Scenario::names(),
        "endpoints ready"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DemoError::Internal(format!("server failed: {e}")));

    sampler.abort();
    tracing::info!("promsim stopped");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received, draining");
}
