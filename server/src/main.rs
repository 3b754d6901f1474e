//! Todocast server.
//!
//! Run with: `cargo run --bin todocast`
//!
//! Settings come from the environment, optionally seeded from a `.env` file.
//!
//! - Health: `GET http://localhost:5000/health`
//! - Metrics: `GET http://localhost:5000/metrics`
//! - Todos: `GET http://localhost:5000/api/todos` with `X-User: alice`

use anyhow::Context;
use std::sync::Arc;
use todocast_core::environment::{RandomIds, SystemClock};
use todocast_runtime::metrics::install_recorder;
use todocast_server::ServerConfig;
use todocast_todos::TodoEnvironment;
use todocast_weather::Weather;
use todocast_web::{AppState, router};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_filter);

    info!(bind_addr = %config.bind_addr, "Starting Todocast");

    let weather = Weather::from_config(&config.weather_config())
        .context("Failed to build weather client")?;
    if weather.is_demo() {
        warn!("Weather lookups are served from demo data");
    }

    let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds));
    let mut state = AppState::new(env, weather, config.default_city.as_str());

    match install_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Metrics disabled"),
    }

    let app = router(state.clone());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.shutdown().await;
    info!("Shutdown complete");

    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(err) => error!("Unable to listen for shutdown signal: {err}"),
    }
}
