// # HTTP IP Source
//
// This crate provides the public IP lookup used for `dynamic` record values.
//
// ## Architecture
//
// Performs one GET against a service that answers with the caller's address
// as plain text (e.g., ipinfo.io/ip), trims trailing whitespace and checks
// the body is an address. No polling, no caching, no fallback to a second
// service.

use r53u_core::record::parse_ip_body;
use r53u_core::traits::IpSource;
use r53u_core::{Error, Result};

use std::time::Duration;

/// Lookup service used unless overridden
pub const DEFAULT_IP_URL: &str = "http://ipinfo.io/ip";

/// Timeout for the lookup request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Plain-text HTTP IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "http://ipinfo.io/ip")
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(url, client))
    }

    /// Create a source with a caller-built HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        tracing::debug!("Fetching public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "{} answered with HTTP {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        let ip = parse_ip_body(&body)?;
        tracing::info!("Public IP is {}", ip);
        Ok(ip)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_with_timeout() {
        let source = HttpIpSource::new(DEFAULT_IP_URL).unwrap();
        assert_eq!(source.describe(), "http://ipinfo.io/ip");
    }
}
