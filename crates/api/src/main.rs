mod config;
mod error;
mod metrics;
mod routes;

use anyhow::Context;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, DEFAULT_LOG_FILTER, LogFormat};
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the real environment may already be set.
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.server.log_format)
            .unwrap_or(LogFormat::Pretty),
    );

    let config = config
        .inspect_err(|e| error!(error = %e, "Refusing to start"))
        .context("Failed to load configuration")?;
    info!(?config, "Configuration loaded");

    let model = analysis::GeminiClient::new(
        config.gemini.base_url.clone(),
        config.gemini.model.clone(),
        config.gemini.api_key.clone(),
    );
    info!(model = %config.gemini.model, "Using model");

    let state = Arc::new(AppState {
        analyzer: analysis::Analyzer::new(Arc::new(model)),
        metrics: metrics::Metrics::new(),
    });

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    info!("Server listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
