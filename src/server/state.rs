//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::TieredRouter;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Router over the model tiers
    pub router: Arc<TieredRouter>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, router: TieredRouter) -> Self {
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
        }
    }
}
