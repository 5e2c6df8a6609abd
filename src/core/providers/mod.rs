//! Provider adapters for the Bedrock model families
//!
//! Each family speaks its own wire dialect over the shared InvokeModel
//! endpoint. The family is resolved once per call from the model id via a
//! fixed substring-pattern table, then everything else dispatches on the
//! enum — adding a family means one new pattern row and one new module.

pub mod claude;
pub mod nova;
pub mod titan;

use crate::core::types::GenerationConfig;
use crate::utils::error::{GatewayError, Result};
use serde_json::{Value, json};

/// Supported model families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Anthropic Claude (Bedrock messages API)
    Claude,
    /// Amazon Nova (messages with content parts)
    Nova,
    /// Amazon Titan Text (flat input text)
    Titan,
}

/// Substring patterns resolving a model id to its family, first match wins.
/// Patterns are substrings rather than prefixes so region-qualified ids
/// (`eu.anthropic.…`) and versioned ids resolve the same way.
const FAMILY_PATTERNS: &[(&str, ModelFamily)] = &[
    ("anthropic", ModelFamily::Claude),
    ("nova", ModelFamily::Nova),
    ("titan-text", ModelFamily::Titan),
];

impl ModelFamily {
    /// Resolve a model id against the pattern table
    pub fn resolve(model_id: &str) -> Option<Self> {
        FAMILY_PATTERNS
            .iter()
            .find(|(pattern, _)| model_id.contains(pattern))
            .map(|(_, family)| *family)
    }
}

/// What to do with a model id that matches no family
///
/// The two call sites made different choices and both are load-bearing:
/// handlers refuse to guess a wire format, while the evaluation tool probes
/// unknown models with a bare `{"prompt"}` body and reads back `output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownModelPolicy {
    /// Fail with an unsupported-model error (handler path)
    Reject,
    /// Send a generic `{"prompt"}` body and parse `output` (evaluation path)
    GenericPrompt,
}

/// Build the family-specific request body for a prompt
pub fn build_request(
    model_id: &str,
    prompt: &str,
    generation: &GenerationConfig,
    policy: UnknownModelPolicy,
) -> Result<Value> {
    match ModelFamily::resolve(model_id) {
        Some(ModelFamily::Claude) => Ok(claude::request_body(prompt, generation)),
        Some(ModelFamily::Nova) => Ok(nova::request_body(prompt, generation)),
        Some(ModelFamily::Titan) => Ok(titan::request_body(prompt, generation)),
        None => match policy {
            UnknownModelPolicy::Reject => Err(GatewayError::unsupported_model(model_id)),
            UnknownModelPolicy::GenericPrompt => Ok(json!({ "prompt": prompt })),
        },
    }
}

/// Extract the generated text from a raw response payload
///
/// A payload that is not JSON is an invocation failure; a payload missing
/// the expected fields is not — extraction is permissive and yields `""`.
pub fn parse_response(model_id: &str, payload: &[u8], policy: UnknownModelPolicy) -> Result<String> {
    let body: Value = serde_json::from_slice(payload)?;

    match ModelFamily::resolve(model_id) {
        Some(ModelFamily::Claude) => Ok(claude::extract_text(&body)),
        Some(ModelFamily::Nova) => Ok(nova::extract_text(&body)),
        Some(ModelFamily::Titan) => Ok(titan::extract_text(&body)),
        None => match policy {
            UnknownModelPolicy::Reject => Err(GatewayError::unsupported_model(model_id)),
            UnknownModelPolicy::GenericPrompt => Ok(body
                .get("output")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()),
        },
    }
}
