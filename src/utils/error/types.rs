//! Error types for the gateway

use crate::core::types::Tier;
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation errors
    ///
    /// The message is the exact wire `error` field (`"Prompt is required"`
    /// and friends), so `Display` adds no prefix here beyond logging context.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model identifier matched no known provider family
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// A chained tier failed; the orchestrator advances on this
    #[error("{tier} model failed: {message}")]
    TierFailed {
        /// Which tier gave up
        tier: Tier,
        /// Underlying failure, already stringified
        message: String,
    },

    /// Every candidate model in the chain failed
    #[error("All models unavailable: {0}")]
    AllModelsUnavailable(String),

    /// Remote configuration service errors (absorbed by the strategy
    /// provider, these never reach a caller)
    #[error("Configuration service error: {0}")]
    ConfigService(String),

    /// SigV4 signing errors
    #[error("Request signing error: {0}")]
    Signing(String),

    /// Non-success response from a model invocation
    #[error("Model invocation error: {0}")]
    Invocation(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
