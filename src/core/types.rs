//! Shared request, reply, and strategy types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Model the hardcoded default strategy points at when the remote
/// configuration cannot be obtained.
pub const DEFAULT_PRIMARY_MODEL: &str = "amazon.titan-text-express-v1";

/// An invocation request as handlers receive it
///
/// Missing fields behave like the empty/default value: an absent prompt is
/// rejected by the same check as an empty one, and `use_case` falls back to
/// `"general"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeRequest {
    /// User prompt to send to the model
    #[serde(default)]
    pub prompt: String,
    /// Use case hint consulted by the model selector
    #[serde(default = "default_use_case")]
    pub use_case: String,
    /// Token budget override, honored by the self-contained handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_use_case() -> String {
    "general".to_string()
}

impl InvokeRequest {
    /// Build a request for a prompt with the default use case
    pub fn new<S: Into<String>>(prompt: S) -> Self {
        Self {
            prompt: prompt.into(),
            use_case: default_use_case(),
            max_tokens: None,
        }
    }
}

/// Inbound payloads for the primary handler
///
/// Orchestrators invoke it directly with an [`InvokeRequest`]; API-gateway
/// style callers wrap the request JSON in an envelope whose `body` is a
/// string. The envelope is detected first, by the presence of `body`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InboundEvent {
    /// API-gateway envelope; `body` holds the serialized request
    Enveloped {
        /// JSON string decoding to an [`InvokeRequest`]
        body: String,
    },
    /// Direct invocation shape
    Direct(InvokeRequest),
}

impl InboundEvent {
    /// Unwrap the envelope, parsing the inner JSON string when present
    pub fn into_request(self) -> crate::utils::error::Result<InvokeRequest> {
        match self {
            Self::Enveloped { body } => Ok(serde_json::from_str(&body)?),
            Self::Direct(request) => Ok(request),
        }
    }
}

/// Uniform reply body, regardless of which tier served the request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeReply {
    /// Concrete model id, `FALLBACK:<id>`, or `DEGRADED_SERVICE`
    pub model_used: String,
    /// Use case the reply was produced for
    pub use_case: String,
    /// Generated (or canned) text
    pub response: String,
}

/// Remotely managed model-selection strategy
///
/// Unknown fields in the remote document are ignored so operators can extend
/// it without breaking older gateways.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelSelectionStrategy {
    /// Model used when no use-case override matches
    pub primary_model: String,
    /// Ordered candidates tried after the primary fails
    #[serde(default)]
    pub fallback_models: Vec<String>,
    /// Exact-match use-case overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case_models: Option<HashMap<String, String>>,
    /// Document revision, set by whoever published it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Publish timestamp, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Author of the last update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Evaluation scores the strategy was derived from, when the document
    /// was published by the evaluation tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_scores: Option<Vec<ModelScore>>,
}

/// Per-model scoring block carried by evaluation-derived strategy documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelScore {
    /// Bedrock model identifier
    pub model_id: String,
    /// Average response latency in seconds
    pub latency: f64,
    /// Average similarity to ground truth, 0 to 1
    pub similarity_score: f64,
    /// Normalized latency score, 0 to 1, higher is faster
    pub latency_score: f64,
    /// Weighted blend of quality and speed
    pub overall_score: f64,
}

impl ModelSelectionStrategy {
    /// Hardcoded strategy used whenever the remote document is unavailable
    pub fn fallback_default() -> Self {
        Self {
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            ..Self::default()
        }
    }
}

/// Generation knobs forwarded to the provider adapters
///
/// The Claude wire format only carries the token budget; temperature and
/// top-p apply to the Nova and Titan families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Maximum tokens the model may generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling cutoff
    pub top_p: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

impl GenerationConfig {
    /// Default settings with an explicit token budget
    pub fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            ..Self::default()
        }
    }

    /// Conservative settings used by the fallback tier
    pub fn reduced() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.5,
            top_p: 0.9,
        }
    }
}

/// Service tiers, in degradation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Strategy-selected model, first in the chain
    Primary,
    /// Hardcoded reliable model with a reduced budget
    Fallback,
    /// Canned responses, terminal and infallible
    Degraded,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Primary => write!(f, "Primary"),
            Tier::Fallback => write!(f, "Fallback"),
            Tier::Degraded => write!(f, "Degraded"),
        }
    }
}
