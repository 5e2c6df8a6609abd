//! Helper constructors for common error cases

use super::types::GatewayError;
use crate::core::types::Tier;

impl GatewayError {
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn config_service<S: Into<String>>(message: S) -> Self {
        Self::ConfigService(message.into())
    }

    pub fn signing<S: Into<String>>(message: S) -> Self {
        Self::Signing(message.into())
    }

    pub fn invocation<S: Into<String>>(message: S) -> Self {
        Self::Invocation(message.into())
    }

    pub fn unsupported_model<S: Into<String>>(model_id: S) -> Self {
        Self::UnsupportedModel(model_id.into())
    }

    /// Wrap any failure into the tier-failure shape the orchestrator sees
    pub fn tier_failed(tier: Tier, source: &GatewayError) -> Self {
        Self::TierFailed {
            tier,
            message: source.to_string(),
        }
    }
}
