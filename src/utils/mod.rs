//! Utility modules for the gateway
//!
//! Currently this is only error handling; the module keeps its own directory
//! so shared helpers have an obvious home as the gateway grows.

pub mod error;
