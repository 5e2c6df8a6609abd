//! # Tiered Gateway
//!
//! A resilient LLM gateway that routes prompts to Amazon Bedrock models with
//! a remotely managed selection strategy, tiered fallback, and graceful
//! degradation.
//!
//! ## Features
//!
//! - **Remote strategy**: model selection driven by an AWS AppConfig profile,
//!   polled with session-token semantics and cached in process
//! - **Provider families**: Claude, Nova, and Titan wire formats behind one
//!   adapter interface
//! - **Tiered fallback**: chained primary/fallback/degraded endpoints for an
//!   external orchestrator, plus a self-contained chain walker
//! - **Always answers**: a hardcoded default strategy and canned degraded
//!   responses keep the gateway responding through outages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tiered_gateway::config::Config;
//! use tiered_gateway::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load().await?;
//!     let server = HttpServer::new(&config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{InvokeReply, InvokeRequest, ModelSelectionStrategy, TieredRouter};
pub use utils::error::{GatewayError, Result};
