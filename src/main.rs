//! bankapp probe server.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration from a TOML file, builds the database connection provider
//! and health probe, sets up the Axum router, and starts the HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bankapp::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use bankapp::http::start_server;
use bankapp::probe::{HealthProbe, PgConnectionProvider};
use bankapp::{create_router, AppState};

/// bankapp: liveness and readiness probes
#[derive(Parser, Debug)]
#[command(name = "bankapp", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "bankapp=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration first: the log format lives in the config file
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        config = %args.config,
        service = %config.probe.service_name,
        timeout_secs = config.probe.timeout_seconds,
        max_connections = config.database.max_connections,
        "Loaded configuration"
    );

    // The pool connects lazily; an unreachable database shows up as a DOWN
    // readiness check rather than a startup failure.
    let provider = PgConnectionProvider::connect_lazy(
        config.database_url(),
        &config.database,
        config.probe.timeout(),
    )?;
    let pool = provider.pool().clone();

    let probe = HealthProbe::new(
        Arc::new(provider),
        config.probe.service_name.clone(),
        config.probe.timeout(),
    );

    let state = AppState::new(probe);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}
