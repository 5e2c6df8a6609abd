//! Server bootstrap
//!
//! This module provides the run_server function for automatic configuration
//! loading and startup logging.

use crate::config::{Config, GatewayRole};
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the gateway with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting Tiered LLM Gateway");

    let config = Config::load().await?;
    info!("✅ Configuration resolved (role: {})", config.server.role);

    let server = HttpServer::new(&config)?;
    info!("🌐 Server starting at: http://{}", config.address());
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    match config.server.role {
        GatewayRole::All => {
            info!("   POST /v1/invoke - Self-contained invocation");
            info!("   POST /v1/invoke/primary - Primary tier");
            info!("   POST /v1/invoke/fallback - Fallback tier");
            info!("   POST /v1/invoke/degraded - Degraded tier");
        }
        GatewayRole::Primary => info!("   POST /v1/invoke/primary - Primary tier"),
        GatewayRole::Fallback => info!("   POST /v1/invoke/fallback - Fallback tier"),
        GatewayRole::Degraded => info!("   POST /v1/invoke/degraded - Degraded tier"),
    }

    server.start().await
}
