// # IP Source Trait
//
// Defines the interface for discovering the caller's public IP address.
//
// ## Implementations
//
// - HTTP lookup: `r53u-ip-http` crate

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// A source answers one question, once: what is the public address right
/// now. It performs a single lookup per call and never retries or falls
/// back to another service.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The address as the service reported it, checked to
    ///   be a valid IP address
    /// - `Err(Error::Network)`: If the lookup failed or returned garbage
    async fn current(&self) -> Result<String, crate::Error>;

    /// Where the address comes from, for progress output
    fn describe(&self) -> String;
}
