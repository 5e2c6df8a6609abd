//! Bedrock runtime HTTP client
//!
//! Thin wrapper around reqwest with AWS SigV4 signing, covering the one
//! runtime operation the gateway needs: `InvokeModel`.

use crate::config::Config;
use crate::services::sigv4::SigV4Signer;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};

/// Bedrock runtime client
#[derive(Debug, Clone)]
pub struct BedrockRuntimeClient {
    http: reqwest::Client,
    signer: SigV4Signer,
    endpoint: String,
}

impl BedrockRuntimeClient {
    /// Create a new runtime client from gateway configuration
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.bedrock.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://bedrock-runtime.{}.amazonaws.com",
                config.aws.region
            )
        });

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.bedrock.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            signer: SigV4Signer::new(&config.aws, "bedrock"),
            endpoint,
        })
    }

    /// Build the InvokeModel URL for a model
    pub fn build_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/invoke", self.endpoint, model_id)
    }

    /// Invoke a model synchronously and return the raw response payload
    pub async fn invoke_model(&self, model_id: &str, body: &Value) -> Result<Bytes> {
        let url = self.build_url(model_id);
        let body_str = serde_json::to_string(body)?;

        debug!("Bedrock request: POST {}", url);
        debug!("Request body: {}", body_str);

        let headers = self.create_signed_headers(&url, &body_str)?;
        let response = self
            .http
            .post(&url)
            .headers(headers)
            .body(body_str)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Bedrock API error: {} - {}", status, error_body);
            return Err(GatewayError::invocation(format!(
                "Bedrock returned {}: {}",
                status, error_body
            )));
        }

        Ok(response.bytes().await?)
    }

    /// Sign the request and convert the headers for reqwest
    fn create_signed_headers(&self, url: &str, body: &str) -> Result<reqwest::header::HeaderMap> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        headers.insert("accept".to_string(), "application/json".to_string());

        let signed = self
            .signer
            .sign_request("POST", url, &headers, body, chrono::Utc::now())?;

        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in signed {
            if let (Ok(header_name), Ok(header_value)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(&value),
            ) {
                header_map.insert(header_name, header_value);
            }
        }
        Ok(header_map)
    }
}
