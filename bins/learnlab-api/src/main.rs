mod handlers;
mod metrics;
mod routes;


use anyhow::Context;
use learnlab_common::config::{LogFormat, ServerConfig};
use learnlab_common::Catalog;
use learnlab_verifier::Verifier;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

pub struct AppState {
    pub catalog: Catalog,
    pub verifier: Verifier,
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    warn!("Received shutdown signal, finishing in-flight requests...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    init_tracing(config.log_format);

    info!("LearnLab API booting...");

    let catalog = Catalog::load_from_file(&config.curriculum_path).with_context(|| {
        format!(
            "Failed to load curriculum from {}",
            config.curriculum_path.display()
        )
    })?;

    let verifier = if config.graph_checks {
        Verifier::default()
    } else {
        Verifier::plain()
    };
    info!(checks = ?verifier.check_names(), "Verifier configured");

    let state = Arc::new(AppState { catalog, verifier });
    let app = routes::routes(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("API shutdown complete");
    Ok(())
}
