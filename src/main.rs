mod config;
mod handlers;
mod metrics;
mod state;
mod tally;
mod types;

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // RUST_LOG wins; otherwise the DEBUG toggle picks the default level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if config.debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting yote tally service");

    let state = AppState::new(config.metrics_auth_token.clone());

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/yote", get(handlers::yote))
        .route("/yote/{account}", get(handlers::yote_account))
        .route("/reset", get(handlers::reset))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/healthz", get(handlers::health_check))
        .route("/admin/stats", get(handlers::admin_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
