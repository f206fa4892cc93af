//! Photo gallery HTTP gateway.
//!
//! Serves the JSON API over the gallery service: remember-cookie sessions,
//! owner-scoped gallery management, image uploads and static image files.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use gallery_service_lib::Services;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

pub use gallery_service_lib::{run_migrations, MigrateAction};

/// Run the HTTP server with the given configuration.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Wire stores, validators and services over one pool
    let services =
        Services::connect(&config.database, &config.security, config.images_dir.clone()).await?;
    services.auto_migrate().await?;

    let addr: SocketAddr = config.server_addr().parse()?;
    info!(environment = %config.environment, "Gateway listening on {}", addr);

    let state = AppState::new(services.clone(), config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    services.close().await?;
    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
