//! Application configuration
//!
//! Built once at startup and handed to [`crate::app::Toolkit`]; nothing reads
//! the environment after that.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::ads::AdConfig;
use crate::error::{Result, ToolkitError};
use crate::pricing::PriceScale;
use crate::valuation::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_HOME_URL: &str = "https://example.com/";
pub const DEFAULT_STORAGE_PATH: &str = ".domain-toolkit/storage.json";
pub const DEFAULT_AD_SCRIPT_URL: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js";

/// Process-wide settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    /// `None` keeps settings in memory only
    pub storage_path: Option<PathBuf>,
    pub home_url: String,
    pub ads: AdConfig,
    pub history_limit: usize,
    pub price_scale: PriceScale,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            storage_path: Some(PathBuf::from(DEFAULT_STORAGE_PATH)),
            home_url: DEFAULT_HOME_URL.to_string(),
            ads: AdConfig {
                script_url: DEFAULT_AD_SCRIPT_URL.to_string(),
                client_id: None,
            },
            history_limit: DEFAULT_HISTORY_LIMIT,
            price_scale: PriceScale::Units,
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| ToolkitError::config(format!("{} is not a valid URL: {}", field, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ToolkitError::config(format!("{} uses unsupported scheme '{}'", field, scheme))),
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| ToolkitError::config(format!("{} must be a number, got '{}'", field, value)))
}

impl AppConfig {
    /// Load from `DOMAIN_TOOLKIT_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = var("DOMAIN_TOOLKIT_API_URL") {
            config.api_base_url = url;
        }
        config.api_token = var("DOMAIN_TOOLKIT_API_TOKEN");

        if let Some(path) = var("DOMAIN_TOOLKIT_STORAGE") {
            config.storage_path = match path.as_str() {
                "memory" | "none" => None,
                _ => Some(PathBuf::from(path)),
            };
        }
        if let Some(home) = var("DOMAIN_TOOLKIT_HOME_URL") {
            config.home_url = home;
        }
        if let Some(script) = var("DOMAIN_TOOLKIT_AD_SCRIPT_URL") {
            config.ads.script_url = script;
        }
        config.ads.client_id = var("DOMAIN_TOOLKIT_AD_CLIENT");

        if let Some(limit) = var("DOMAIN_TOOLKIT_HISTORY_LIMIT") {
            config.history_limit = parse_number("DOMAIN_TOOLKIT_HISTORY_LIMIT", &limit)?;
        }
        if let Some(scale) = var("DOMAIN_TOOLKIT_PRICE_SCALE") {
            config.price_scale = PriceScale::parse(&scale).ok_or_else(|| {
                ToolkitError::config(format!(
                    "DOMAIN_TOOLKIT_PRICE_SCALE must be 'units' or 'legacy', got '{}'",
                    scale
                ))
            })?;
        }
        if let Some(secs) = var("DOMAIN_TOOLKIT_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("DOMAIN_TOOLKIT_TIMEOUT_SECS", &secs)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_http_url("DOMAIN_TOOLKIT_API_URL", &self.api_base_url)?;
        validate_http_url("DOMAIN_TOOLKIT_HOME_URL", &self.home_url)?;
        validate_http_url("DOMAIN_TOOLKIT_AD_SCRIPT_URL", &self.ads.script_url)?;

        if self.request_timeout.is_zero() {
            return Err(ToolkitError::config("DOMAIN_TOOLKIT_TIMEOUT_SECS must be greater than zero"));
        }
        Ok(())
    }
}
