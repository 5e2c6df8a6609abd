//! Nova family wire format
//!
//! Nova speaks a messages API where each message holds a list of content
//! parts, and tucks its sampling settings under `inferenceConfig`.

use crate::core::types::GenerationConfig;
use serde_json::{Value, json};

pub(crate) fn request_body(prompt: &str, generation: &GenerationConfig) -> Value {
    json!({
        "messages": [
            {
                "role": "user",
                "content": [{ "text": prompt }],
            }
        ],
        "inferenceConfig": {
            "max_new_tokens": generation.max_tokens,
            "temperature": generation.temperature,
            "top_p": generation.top_p,
        },
    })
}

pub(crate) fn extract_text(body: &Value) -> String {
    body.get("output")
        .and_then(|output| output.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|first| first.get("text"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}
