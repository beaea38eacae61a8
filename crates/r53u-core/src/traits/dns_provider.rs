// # DNS Provider Trait
//
// Defines the interface for resolving hosted zones and upserting records
// via a provider API.
//
// ## Implementations
//
// - Route 53: `r53u-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use r53u_core::DnsProvider;
//
// let zone = provider.find_zone("example.com.").await?;
// let change = provider.upsert_record(&zone, &request).await?;
// ```

use crate::record::{ChangeInfo, RecordRequest, ZoneHandle};
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// Providers are single-shot: each method performs one API call and
/// returns its outcome. They never retry, sleep or cache; any failure is
/// returned to the caller, which treats it as terminal.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Look up a hosted zone by name
    ///
    /// # Returns
    ///
    /// - `Ok(ZoneHandle)`: The zone with its prefix-stripped id
    /// - `Err(Error::NotFound)`: No hosted zone has this name
    /// - `Err(Error)`: Any other lookup failure
    async fn find_zone(&self, zone_name: &str) -> Result<ZoneHandle, crate::Error>;

    /// Submit one UPSERT change for a single-value record set
    ///
    /// The record set is created when absent and replaced when present.
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeInfo)`: The provider accepted the change
    /// - `Err(Error)`: The submission was rejected or never reached the provider
    async fn upsert_record(
        &self,
        zone: &ZoneHandle,
        record: &RecordRequest,
    ) -> Result<ChangeInfo, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
