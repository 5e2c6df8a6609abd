//! Configuration and strategy-document fixtures

use serde_json::{Value, json};
use tiered_gateway::config::Config;

/// Gateway configuration pointed at mock endpoints
///
/// Dummy static credentials keep the SigV4 signer deterministic; the mock
/// servers accept any signature.
pub fn test_config(bedrock_url: &str, appconfig_url: &str) -> Config {
    let mut config = Config::default();
    config.aws.access_key_id = "AKIATESTKEY".to_string();
    config.aws.secret_access_key = "test-secret".to_string();
    config.bedrock.endpoint = Some(bedrock_url.to_string());
    config.bedrock.timeout_secs = 5;
    config.appconfig.endpoint = Some(appconfig_url.to_string());
    config
}

/// A strategy document as AppConfig would serve it
pub fn strategy_json(primary: &str, fallbacks: &[&str]) -> Value {
    json!({
        "primary_model": primary,
        "fallback_models": fallbacks,
    })
}

/// A strategy document with use-case overrides
pub fn strategy_json_with_use_cases(
    primary: &str,
    fallbacks: &[&str],
    use_cases: &[(&str, &str)],
) -> Value {
    let mut document = strategy_json(primary, fallbacks);
    document["use_case_models"] = use_cases
        .iter()
        .map(|(use_case, model)| ((*use_case).to_string(), json!(model)))
        .collect::<serde_json::Map<String, Value>>()
        .into();
    document
}
