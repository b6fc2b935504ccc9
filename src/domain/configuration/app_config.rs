//! Application configuration models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `portfolio.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Market data configuration.
    #[serde(default)]
    pub market: MarketConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.market.validate()
    }
}

/// Which market data client to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketProvider {
    /// Offline client with fixed prices.
    Mock,
    /// Yahoo Finance compatible HTTP API.
    #[default]
    Yahoo,
}

impl MarketProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketProvider::Mock => "mock",
            MarketProvider::Yahoo => "yahoo",
        }
    }
}

impl FromStr for MarketProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(MarketProvider::Mock),
            "yahoo" => Ok(MarketProvider::Yahoo),
            other => Err(AppError::InvalidConfig(format!(
                "unknown market provider '{other}': expected 'mock' or 'yahoo'"
            ))),
        }
    }
}

impl fmt::Display for MarketProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market data API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    #[serde(default)]
    pub provider: MarketProvider,
    /// API root URL.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Region used for quote lookups.
    #[serde(default = "default_region")]
    pub region: String,
    /// API keys rotated across requests.
    #[serde(default)]
    pub api_keys: Vec<String>,
}

impl fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("region", &self.region)
            .field("api_keys", &format_args!("[{} REDACTED]", self.api_keys.len()))
            .finish()
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            provider: MarketProvider::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            region: default_region(),
            api_keys: Vec::new(),
        }
    }
}

impl MarketConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.region.trim().is_empty() {
            return Err(AppError::InvalidConfig("region must not be empty".to_string()));
        }
        if self.api_keys.iter().any(|key| key.trim().is_empty()) {
            return Err(AppError::InvalidConfig("api_keys must not contain blank keys".to_string()));
        }
        Ok(())
    }
}

fn default_base_url() -> Url {
    Url::parse("https://yfapi.net").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    4
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_region() -> String {
    "US".to_string()
}
