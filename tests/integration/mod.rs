//! Integration tests for tiered-gateway
//!
//! These tests verify the interaction between multiple components against
//! mocked AWS endpoints, without touching the network.

pub mod handler_tests;
