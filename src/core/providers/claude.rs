//! Claude family wire format
//!
//! Bedrock's Anthropic integration uses the messages API pinned to a
//! provider-defined version string. Only the token budget is configurable;
//! Claude requests carry no sampling knobs here.

use crate::core::types::GenerationConfig;
use serde_json::{Value, json};

const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

pub(crate) fn request_body(prompt: &str, generation: &GenerationConfig) -> Value {
    json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "max_tokens": generation.max_tokens,
        "messages": [
            {
                "role": "user",
                "content": prompt,
            }
        ],
    })
}

pub(crate) fn extract_text(body: &Value) -> String {
    body.get("content")
        .and_then(|content| content.get(0))
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
