//! Local HTTP server exposing the analyzer.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)

mod handlers;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use landscape_core::Config;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Configuration applied to every analysis run.
    pub config: Config,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the analysis server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Analysis configuration.
    pub config: Config,
}

// =============================================================================
// Server Entry Point
// =============================================================================

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/status", get(handlers::status))
        // CORS for API access
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the analysis server.
pub async fn start_server(config: ServeConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState {
        config: config.config,
    });
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!(%addr, "starting analysis server");

    println!("Landscape API: http://localhost:{}/api", config.port);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
