//! Titan Text family wire format
//!
//! The oldest dialect of the three: a flat `inputText` with camel-cased
//! generation settings, answered by a `results` array.

use crate::core::types::GenerationConfig;
use serde_json::{Value, json};

pub(crate) fn request_body(prompt: &str, generation: &GenerationConfig) -> Value {
    json!({
        "inputText": prompt,
        "textGenerationConfig": {
            "maxTokenCount": generation.max_tokens,
            "temperature": generation.temperature,
            "topP": generation.top_p,
        },
    })
}

pub(crate) fn extract_text(body: &Value) -> String {
    body.get("results")
        .and_then(|results| results.get(0))
        .and_then(|first| first.get("outputText"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
