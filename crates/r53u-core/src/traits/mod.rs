//! Core traits for the updater
//!
//! - [`IpSource`]: Discover the public IP address
//! - [`DnsProvider`]: Resolve zones and upsert records via a provider API

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::DnsProvider;
