//! Runtime settings from environment variables

use anyhow::Result;
use r53u_core::config::default_config_path;
use r53u_ip_http::DEFAULT_IP_URL;
use r53u_provider_route53::ROUTE53_ENDPOINT;
use std::path::PathBuf;
use tracing::Level;

pub const CONFIG_VAR: &str = "ROUTE53_UPDATER_CONFIG";
pub const IP_URL_VAR: &str = "ROUTE53_UPDATER_IP_URL";
pub const ENDPOINT_VAR: &str = "ROUTE53_UPDATER_ENDPOINT";
pub const MODE_VAR: &str = "ROUTE53_UPDATER_MODE";
pub const LOG_LEVEL_VAR: &str = "ROUTE53_UPDATER_LOG_LEVEL";

/// Everything the binary takes from its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub ip_url: String,
    pub endpoint: String,
    pub dry_run: bool,
    pub log_level: String,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            config_path: non_empty(CONFIG_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_config_path),
            ip_url: non_empty(IP_URL_VAR).unwrap_or_else(|| DEFAULT_IP_URL.to_string()),
            endpoint: non_empty(ENDPOINT_VAR).unwrap_or_else(|| ROUTE53_ENDPOINT.to_string()),
            dry_run: non_empty(MODE_VAR).is_some_and(|m| m.trim().eq_ignore_ascii_case("dry-run")),
            log_level: non_empty(LOG_LEVEL_VAR).unwrap_or_else(|| "warn".to_string()),
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        for (var, url) in [(IP_URL_VAR, &self.ip_url), (ENDPOINT_VAR, &self.endpoint)] {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                anyhow::bail!("{} must use HTTP or HTTPS scheme. Got: {}", var, url);
            }
        }

        self.level()?;
        Ok(())
    }

    /// Max tracing level
    pub fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "{} '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                LOG_LEVEL_VAR,
                self.log_level
            ),
        }
    }
}
