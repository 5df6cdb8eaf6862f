//! ARM client configuration
//!
//! Loaded from TOML or from `ARM_*` environment variables.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default Resource Manager endpoint (public cloud).
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";
/// Storage resource provider API version.
pub const DEFAULT_API_VERSION: &str = "2019-04-01";
/// Default number of retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const ENV_SUBSCRIPTION_ID: &str = "ARM_SUBSCRIPTION_ID";
pub const ENV_ACCESS_TOKEN: &str = "ARM_ACCESS_TOKEN";
pub const ENV_ENDPOINT: &str = "ARM_ENDPOINT";
pub const ENV_API_VERSION: &str = "ARM_API_VERSION";
pub const ENV_MAX_RETRIES: &str = "ARM_MAX_RETRIES";

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{field}`: {detail}")]
    Invalid { field: &'static str, detail: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Connection settings for [`ArmAccountsClient`](crate::ArmAccountsClient).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ArmClientConfig {
    /// Resource Manager base URL, without trailing slash.
    pub endpoint: String,
    pub subscription_id: String,
    pub api_version: String,
    /// Bearer token for the Resource Manager audience.
    pub access_token: String,
    /// Retries for transient failures (0 disables retrying).
    pub max_retries: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ArmClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: String::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for ArmClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmClientConfig")
            .field("endpoint", &self.endpoint)
            .field("subscription_id", &self.subscription_id)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .field("max_retries", &self.max_retries)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ArmClientConfig {
    pub fn new(subscription_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            access_token: access_token.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `ARM_*` environment variables and validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self {
            subscription_id: lookup(ENV_SUBSCRIPTION_ID).ok_or(ConfigError::Missing(ENV_SUBSCRIPTION_ID))?,
            access_token: lookup(ENV_ACCESS_TOKEN).ok_or(ConfigError::Missing(ENV_ACCESS_TOKEN))?,
            ..Self::default()
        };
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(api_version) = lookup(ENV_API_VERSION) {
            config.api_version = api_version;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                field: ENV_MAX_RETRIES,
                detail: format!("{raw:?}: {e}"),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check required settings and normalise the endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscription_id.trim().is_empty() {
            return Err(ConfigError::Missing("subscription_id"));
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Missing("access_token"));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "endpoint",
                detail: format!("{:?} is not an http(s) URL", self.endpoint),
            });
        }
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api_version",
                detail: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Endpoint without trailing slash.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
