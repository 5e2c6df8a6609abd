//! Common test utilities for tiered-gateway
//!
//! This module provides shared test infrastructure for all tests:
//! - Wiremock stand-ins for the two AWS surfaces the gateway calls
//! - Configuration and strategy-document fixtures

pub mod fixtures;

pub use fixtures::{strategy_json, test_config};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
