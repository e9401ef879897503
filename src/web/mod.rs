//! Web server and API endpoints for the telemetry dashboard.
//!
//! The server is pull-based: every request walks through the shared
//! [`AppState`] into the tiered cache, which decides whether the backing
//! commands actually run. There is no background polling task.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use handlers::AppState;
pub use router::create_app;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::error::{MonitorError, Result};

/// Start the web server with the provided configuration and shared state.
pub async fn start_web_server(config: WebConfig, state: Arc<AppState>) -> Result<()> {
    let app = create_app(config.clone(), state).await?;

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| MonitorError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting rigwatch web server on http://{}", addr);
    info!("Dashboard available at http://{}/", addr);
    info!("API endpoint: http://{}/api/stats", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MonitorError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MonitorError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}

/// Start a web server with simple port-only configuration.
///
/// This is a convenience function for the common use case of just
/// specifying a port; everything else keeps its default.
pub async fn start_web_server_simple(port: u16, state: Arc<AppState>) -> Result<()> {
    let config = WebConfig::default().with_port(port);
    start_web_server(config, state).await
}
