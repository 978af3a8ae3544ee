//! Dashboard API server implementation

use crate::AppState;
use crate::dashboard::Dashboard;
use crate::handlers;
use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// UI server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable the UI server
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Host to bind to (default: 127.0.0.1 for security)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (default: 8083)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_enabled() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8083
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Build the router with all API routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::api::health))
        .route("/api/dashboard", get(handlers::api::dashboard))
        .route("/api/refresh", post(handlers::api::refresh))
        .route("/api/models", get(handlers::api::models_list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// UI Server
pub struct UiServer {
    config: UiConfig,
    dashboard: Arc<Dashboard>,
}

impl UiServer {
    pub fn new(config: UiConfig, dashboard: Arc<Dashboard>) -> Self {
        Self { config, dashboard }
    }

    /// Start the UI server
    pub async fn serve(self) -> anyhow::Result<()> {
        if !self.config.enabled {
            info!("📊 UI server disabled in configuration");
            return Ok(());
        }

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

        let router = router(AppState {
            dashboard: self.dashboard,
        });

        info!("📊 Match Lens dashboard API starting on http://{}", addr);
        info!("   Dashboard:  http://{}/api/dashboard", addr);
        info!("   Models:     http://{}/api/models", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
