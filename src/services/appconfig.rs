//! AWS AppConfig Data API client and strategy provider
//!
//! The gateway reads its model selection strategy from an AppConfig
//! configuration profile. The Data API is session based: a session token is
//! created once, then every poll returns the next token to use plus the
//! configuration payload (empty when nothing changed since the last poll).

use crate::config::Config;
use crate::core::types::ModelSelectionStrategy;
use crate::services::sigv4::SigV4Signer;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartSessionRequest<'a> {
    application_identifier: &'a str,
    environment_identifier: &'a str,
    configuration_profile_identifier: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StartSessionResponse {
    initial_configuration_token: String,
}

/// Low-level AppConfig Data API client
#[derive(Debug, Clone)]
pub struct AppConfigDataClient {
    http: reqwest::Client,
    signer: SigV4Signer,
    endpoint: String,
}

impl AppConfigDataClient {
    /// Create a new Data API client from gateway configuration
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.appconfig.endpoint.clone().unwrap_or_else(|| {
            format!("https://appconfigdata.{}.amazonaws.com", config.aws.region)
        });

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            signer: SigV4Signer::new(&config.aws, "appconfigdata"),
            endpoint,
        })
    }

    /// Start a configuration session and return the initial token
    pub async fn start_session(
        &self,
        application: &str,
        environment: &str,
        profile: &str,
    ) -> Result<String> {
        let url = format!("{}/configurationsessions", self.endpoint);
        let body = serde_json::to_string(&StartSessionRequest {
            application_identifier: application,
            environment_identifier: environment,
            configuration_profile_identifier: profile,
        })?;

        debug!("AppConfig request: POST {}", url);

        let headers = self.signed_headers("POST", &url, &body)?;
        let response = self
            .http
            .post(&url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::config_service(format!(
                "AppConfig session request failed with {}: {}",
                status, error_body
            )));
        }

        let session: StartSessionResponse = serde_json::from_slice(&response.bytes().await?)?;
        Ok(session.initial_configuration_token)
    }

    /// Poll for the latest configuration
    ///
    /// Returns the next-poll token and the raw payload. An empty payload
    /// means the configuration has not changed since the previous poll.
    pub async fn get_latest_configuration(&self, token: &str) -> Result<(String, Bytes)> {
        let url = self.configuration_url(token)?;

        debug!("AppConfig request: GET {}", url);

        let headers = self.signed_headers("GET", &url, "")?;
        let response = self.http.get(&url).headers(headers).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::config_service(format!(
                "AppConfig fetch failed with {}: {}",
                status, error_body
            )));
        }

        let next_token = response
            .headers()
            .get("Next-Poll-Configuration-Token")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
            .ok_or_else(|| {
                GatewayError::config_service("Missing Next-Poll-Configuration-Token header")
            })?;

        let payload = response.bytes().await?;
        Ok((next_token, payload))
    }

    fn configuration_url(&self, token: &str) -> Result<String> {
        let mut url = url::Url::parse(&format!("{}/configuration", self.endpoint))
            .map_err(|e| GatewayError::config_service(format!("Invalid endpoint: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("configuration_token", token);
        Ok(url.to_string())
    }

    fn signed_headers(
        &self,
        method: &str,
        url: &str,
        body: &str,
    ) -> Result<reqwest::header::HeaderMap> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let signed = self
            .signer
            .sign_request(method, url, &headers, body, chrono::Utc::now())?;

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

#[derive(Debug, Default)]
struct ConfigSession {
    token: Option<String>,
    cached: Option<ModelSelectionStrategy>,
}

/// Cached model selection strategy backed by AppConfig
///
/// `get_strategy` is total: any session, fetch, or parse failure is logged
/// and the hardcoded default strategy is returned instead. The session token
/// is created lazily, advanced after every successful fetch, and only ever
/// reset by a process restart.
#[derive(Debug)]
pub struct StrategyProvider {
    client: AppConfigDataClient,
    application: String,
    environment: String,
    profile: String,
    session: Mutex<ConfigSession>,
}

impl StrategyProvider {
    /// Create a provider from gateway configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: AppConfigDataClient::new(config)?,
            application: config.appconfig.application.clone(),
            environment: config.appconfig.environment.clone(),
            profile: config.appconfig.profile.clone(),
            session: Mutex::new(ConfigSession::default()),
        })
    }

    /// Current model selection strategy, falling back on any failure
    ///
    /// The cache only answers the empty-payload (unchanged) path; a failed
    /// poll yields the hardcoded default outright, so a broken configuration
    /// service always degrades to the same known-good model.
    pub async fn get_strategy(&self) -> ModelSelectionStrategy {
        match self.refresh().await {
            Ok(strategy) => strategy,
            Err(e) => {
                warn!("Failed to fetch model selection strategy: {}", e);
                ModelSelectionStrategy::fallback_default()
            }
        }
    }

    /// Poll AppConfig once and return the freshest strategy
    ///
    /// The session lock is held across the whole round trip so the token
    /// chain advances linearly even under concurrent requests.
    async fn refresh(&self) -> Result<ModelSelectionStrategy> {
        let mut session = self.session.lock().await;

        let token = match session.token.clone() {
            Some(token) => token,
            None => {
                let token = self
                    .client
                    .start_session(&self.application, &self.environment, &self.profile)
                    .await?;
                info!("Started AppConfig configuration session");
                session.token = Some(token.clone());
                token
            }
        };

        let (next_token, payload) = self.client.get_latest_configuration(&token).await?;
        session.token = Some(next_token);

        if payload.is_empty() {
            debug!("Configuration unchanged since last poll");
        } else {
            let strategy: ModelSelectionStrategy = serde_json::from_slice(&payload)?;
            session.cached = Some(strategy);
        }

        session
            .cached
            .clone()
            .ok_or_else(|| GatewayError::config_service("No configuration available yet"))
    }
}
