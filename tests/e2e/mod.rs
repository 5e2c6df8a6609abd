//! End-to-end tests for tiered-gateway
//!
//! These tests call the real AWS APIs and require credentials.
//! Run with: cargo test -- --ignored
//!
//! Required environment variables:
//! - AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY: credentials with
//!   `bedrock:InvokeModel` (and optionally AppConfig read) permission
//! - AWS_REGION: region with Bedrock model access enabled

pub mod bedrock;
