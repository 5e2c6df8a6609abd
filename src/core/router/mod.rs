//! Tiered model routing
//!
//! One router drives every deployment tier. The chained tiers (`primary`,
//! `fallback`, `degraded`) serve deployments where an external orchestrator
//! walks the degradation chain itself, catching each tier's failure and
//! calling the next; `complete` is the self-contained variant that walks the
//! configured model chain in process and answers 503 on exhaustion.
//!
//! ## Module Structure
//!
//! - `selection` - Use-case to model-id selection
//! - `degrade` - Canned responses for the terminal tier

pub mod degrade;
pub mod selection;

pub use degrade::degraded_response;
pub use selection::select_model;

use crate::config::Config;
use crate::core::providers::{self, UnknownModelPolicy};
use crate::core::types::{GenerationConfig, InvokeReply, InvokeRequest, Tier};
use crate::services::{BedrockRuntimeClient, StrategyProvider};
use crate::utils::error::{GatewayError, Result};
use tracing::{error, info};

/// Model the fallback tier invokes regardless of strategy
pub const FALLBACK_MODEL_ID: &str = "amazon.titan-text-express-v1";

/// `model_used` marker for replies served by the degraded tier
pub const DEGRADED_MODEL_MARKER: &str = "DEGRADED_SERVICE";

/// What to do once every candidate model has failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Surface the last error as a tier failure for the orchestrator
    Propagate(Tier),
    /// Absorb the failures and report all models unavailable
    ServiceUnavailable,
}

/// Router over the configured model tiers
///
/// Each tier makes exactly one attempt per candidate model; there is no
/// retry within a candidate. Configuration failures never surface here,
/// the strategy provider absorbs them.
#[derive(Debug)]
pub struct TieredRouter {
    strategies: StrategyProvider,
    bedrock: BedrockRuntimeClient,
}

impl TieredRouter {
    /// Build a router from gateway configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            strategies: StrategyProvider::new(config)?,
            bedrock: BedrockRuntimeClient::new(config)?,
        })
    }

    /// Self-contained completion: walk the strategy's model chain in order
    ///
    /// Candidates are the use-case selection followed by the strategy's
    /// fallback models. The request's token budget override applies to every
    /// candidate.
    pub async fn complete(&self, request: &InvokeRequest) -> Result<InvokeReply> {
        let strategy = self.strategies.get_strategy().await;

        let mut candidates = vec![select_model(&strategy, &request.use_case)];
        candidates.extend(strategy.fallback_models.iter().map(String::as_str));

        let generation = match request.max_tokens {
            Some(max_tokens) => GenerationConfig::with_max_tokens(max_tokens),
            None => GenerationConfig::default(),
        };

        let (model_used, response) = self
            .run_chain(
                &candidates,
                &request.prompt,
                &generation,
                ExhaustionPolicy::ServiceUnavailable,
            )
            .await?;

        Ok(InvokeReply {
            model_used,
            use_case: request.use_case.clone(),
            response,
        })
    }

    /// Primary tier: one attempt against the strategy-selected model
    pub async fn primary(&self, request: &InvokeRequest) -> Result<InvokeReply> {
        let strategy = self.strategies.get_strategy().await;
        let model_id = select_model(&strategy, &request.use_case);

        let (model_used, response) = self
            .run_chain(
                &[model_id],
                &request.prompt,
                &GenerationConfig::default(),
                ExhaustionPolicy::Propagate(Tier::Primary),
            )
            .await?;

        Ok(InvokeReply {
            model_used,
            use_case: request.use_case.clone(),
            response,
        })
    }

    /// Fallback tier: one attempt against the hardcoded reliable model
    ///
    /// Deliberately skips the strategy provider; this tier must work when
    /// the configuration service is part of the outage.
    pub async fn fallback(&self, request: &InvokeRequest) -> Result<InvokeReply> {
        let (model_used, response) = self
            .run_chain(
                &[FALLBACK_MODEL_ID],
                &request.prompt,
                &GenerationConfig::reduced(),
                ExhaustionPolicy::Propagate(Tier::Fallback),
            )
            .await?;

        Ok(InvokeReply {
            model_used: format!("FALLBACK:{}", model_used),
            use_case: request.use_case.clone(),
            response,
        })
    }

    /// Degraded tier: canned response lookup, cannot fail
    pub fn degraded(&self, request: &InvokeRequest) -> InvokeReply {
        info!(
            "Serving degraded response for use case: {}",
            request.use_case
        );

        InvokeReply {
            model_used: DEGRADED_MODEL_MARKER.to_string(),
            use_case: request.use_case.clone(),
            response: degraded_response(&request.use_case).to_string(),
        }
    }

    /// Try each candidate once, in order, until one succeeds
    async fn run_chain(
        &self,
        candidates: &[&str],
        prompt: &str,
        generation: &GenerationConfig,
        exhaustion: ExhaustionPolicy,
    ) -> Result<(String, String)> {
        let mut last_error: Option<GatewayError> = None;

        for model_id in candidates {
            info!("Trying model: {}", model_id);
            match self.attempt(model_id, prompt, generation).await {
                Ok(text) => return Ok(((*model_id).to_string(), text)),
                Err(e) => {
                    error!("Model {} failed: {}", model_id, e);
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Unknown error".to_string());

        match exhaustion {
            ExhaustionPolicy::Propagate(tier) => Err(GatewayError::TierFailed {
                tier,
                message: detail,
            }),
            ExhaustionPolicy::ServiceUnavailable => {
                Err(GatewayError::AllModelsUnavailable(detail))
            }
        }
    }

    /// One build/invoke/parse round trip against a single model
    async fn attempt(
        &self,
        model_id: &str,
        prompt: &str,
        generation: &GenerationConfig,
    ) -> Result<String> {
        let body =
            providers::build_request(model_id, prompt, generation, UnknownModelPolicy::Reject)?;
        let payload = self.bedrock.invoke_model(model_id, &body).await?;
        providers::parse_response(model_id, &payload, UnknownModelPolicy::Reject)
    }
}
