//! Configuration management for the gateway
//!
//! Configuration comes from an optional YAML file overlaid with environment
//! variables; the environment always wins. Every field has a default so the
//! gateway can start with no file at all.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Which route group this gateway instance serves
///
/// Deployments that split the tiers across separate instances run one
/// instance per role; `All` serves every route from a single process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayRole {
    #[default]
    All,
    Primary,
    Fallback,
    Degraded,
}

impl FromStr for GatewayRole {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "primary" => Ok(Self::Primary),
            "fallback" => Ok(Self::Fallback),
            "degraded" | "degradation" => Ok(Self::Degraded),
            other => Err(GatewayError::Config(format!(
                "Unknown gateway role: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for GatewayRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Route group served by this instance
    #[serde(default)]
    pub role: GatewayRole,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            role: GatewayRole::All,
        }
    }
}

/// AWS region and credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
        }
    }
}

/// AppConfig profile coordinates for the model selection strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigSettings {
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Endpoint override, mainly for tests
    pub endpoint: Option<String>,
}

impl Default for AppConfigSettings {
    fn default() -> Self {
        Self {
            application: default_application(),
            environment: default_environment(),
            profile: default_profile(),
            endpoint: None,
        }
    }
}

/// Bedrock runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockSettings {
    /// Endpoint override, mainly for tests
    pub endpoint: Option<String>,
    #[serde(default = "default_bedrock_timeout")]
    pub timeout_secs: u64,
}

impl Default for BedrockSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_bedrock_timeout(),
        }
    }
}

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub appconfig: AppConfigSettings,
    #[serde(default)]
    pub bedrock: BedrockSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load the effective configuration
    ///
    /// Reads `GATEWAY_CONFIG` if set, otherwise `config/gateway.yaml` if it
    /// exists, otherwise the defaults. Environment variables are applied on
    /// top, then the result is validated.
    pub async fn load() -> Result<Self> {
        let mut config = match std::env::var("GATEWAY_CONFIG") {
            Ok(path) => Self::from_file(&path).await?,
            Err(_) => {
                let default_path = Path::new("config/gateway.yaml");
                if default_path.exists() {
                    Self::from_file(default_path).await?
                } else {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables onto the configuration
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid GATEWAY_PORT: {}", e)))?;
        }
        if let Ok(role) = std::env::var("GATEWAY_ROLE") {
            self.server.role = role.parse()?;
        }

        if let Ok(region) = std::env::var("AWS_REGION") {
            self.aws.region = region;
        }
        if let Ok(key) = std::env::var("AWS_ACCESS_KEY_ID") {
            self.aws.access_key_id = key;
        }
        if let Ok(secret) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            self.aws.secret_access_key = secret;
        }
        if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
            self.aws.session_token = Some(token);
        }

        if let Ok(app) = std::env::var("APPCONFIG_APP") {
            self.appconfig.application = app;
        }
        if let Ok(env) = std::env::var("APPCONFIG_ENV") {
            self.appconfig.environment = env;
        }
        if let Ok(profile) = std::env::var("APPCONFIG_CONFIG") {
            self.appconfig.profile = profile;
        }
        if let Ok(endpoint) = std::env::var("APPCONFIG_ENDPOINT") {
            self.appconfig.endpoint = Some(endpoint);
        }

        if let Ok(endpoint) = std::env::var("BEDROCK_ENDPOINT") {
            self.bedrock.endpoint = Some(endpoint);
        }
        if let Ok(timeout) = std::env::var("BEDROCK_TIMEOUT_SECS") {
            self.bedrock.timeout_secs = timeout.parse().map_err(|e| {
                GatewayError::Config(format!("Invalid BEDROCK_TIMEOUT_SECS: {}", e))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(GatewayError::Config("Port cannot be 0".to_string()));
        }
        if self.aws.region.is_empty() {
            return Err(GatewayError::Config(
                "AWS region cannot be empty".to_string(),
            ));
        }
        if self.appconfig.application.is_empty()
            || self.appconfig.environment.is_empty()
            || self.appconfig.profile.is_empty()
        {
            return Err(GatewayError::Config(
                "AppConfig identifiers cannot be empty".to_string(),
            ));
        }
        if self.bedrock.timeout_secs == 0 {
            return Err(GatewayError::Config(
                "Bedrock timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the server bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_application() -> String {
    "AIAssistantApp".to_string()
}

fn default_environment() -> String {
    "Production".to_string()
}

fn default_profile() -> String {
    "ModelSelectionStrategy".to_string()
}

fn default_bedrock_timeout() -> u64 {
    30
}
