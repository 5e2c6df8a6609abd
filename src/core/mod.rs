//! Core functionality for the gateway
//!
//! This module contains the routing logic and the data structures shared by
//! the HTTP handlers, the provider adapters, and the evaluation tool.

pub mod providers;
pub mod router;
pub mod types;

pub use router::TieredRouter;
pub use types::{InvokeReply, InvokeRequest, ModelSelectionStrategy};
