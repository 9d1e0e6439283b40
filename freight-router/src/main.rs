use std::process::ExitCode;

use freight_router::config::ServerConfig;
use freight_router::snapshot::Snapshot;
use freight_router::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Load the feed once; it is never reloaded
    let snapshot = match Snapshot::load(&config.data_path) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Failed to load freight data");
            return ExitCode::FAILURE;
        }
    };
    info!(
        path = %config.data_path.display(),
        sailings = snapshot.len(),
        exchange_rates = snapshot.exchange_rates().len(),
        "Loaded freight snapshot"
    );

    let state = AppState::new(snapshot, config.search.clone(), &config.cache);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.addr, max_hops = config.search.max_hops, "Freight route planner listening");
    info!("  GET /health");
    info!("  GET /route?origin=CNSHA&destination=NLRTM&criteria=cheapest");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
