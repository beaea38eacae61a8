//! Record, zone and change types
//!
//! These live for a single invocation and are never persisted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Value token that asks for the caller's public IP
pub const DYNAMIC_VALUE: &str = "dynamic";

/// Record type used when none is given, and forced for dynamic values
pub const DEFAULT_RECORD_TYPE: &str = "A";

/// The single record set to upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Hosted zone name (e.g., "example.com.")
    pub zone: String,

    /// Record name (e.g., "www.example.com.")
    pub record_name: String,

    /// Record type (A, MX, TXT, ...)
    pub record_type: String,

    /// Record value, or [`DYNAMIC_VALUE`] until resolved
    pub value: String,

    /// Time-to-live in seconds
    pub ttl: u32,
}

impl RecordRequest {
    /// Create a request, defaulting the record type to `A`
    pub fn new(
        zone: impl Into<String>,
        record_name: impl Into<String>,
        record_type: Option<String>,
        value: impl Into<String>,
        ttl: u32,
    ) -> Result<Self> {
        let request = Self {
            zone: zone.into(),
            record_name: record_name.into(),
            record_type: record_type.unwrap_or_else(|| DEFAULT_RECORD_TYPE.to_string()),
            value: value.into(),
            ttl,
        };

        for (field, value) in [
            ("zone", &request.zone),
            ("record name", &request.record_name),
            ("record type", &request.record_type),
            ("record value", &request.value),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_input(format!("{} cannot be empty", field)));
            }
        }

        Ok(request)
    }

    /// Whether the value still needs the public IP substituted
    pub fn is_dynamic(&self) -> bool {
        self.value == DYNAMIC_VALUE
    }

    /// Substitute the resolved public IP; the type becomes `A` whatever it was
    pub fn with_resolved_ip(mut self, ip: impl Into<String>) -> Self {
        self.value = ip.into();
        self.record_type = DEFAULT_RECORD_TYPE.to_string();
        self
    }
}

/// A hosted zone resolved by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneHandle {
    /// Zone name as requested
    pub zone_name: String,

    /// Provider zone id without its path prefix (e.g., "Z1D633PJN98FT9")
    pub zone_id: String,
}

impl ZoneHandle {
    /// Build a handle from the provider's resource identifier
    pub fn new(zone_name: impl Into<String>, resource_id: &str) -> Self {
        Self {
            zone_name: zone_name.into(),
            zone_id: strip_resource_prefix(resource_id).to_string(),
        }
    }
}

/// Provider acknowledgement of a submitted change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Change id without its path prefix
    pub id: String,

    /// Change status (e.g., "PENDING", "INSYNC")
    pub status: String,
}

/// Check an IP lookup response body and return the address text
///
/// Only trailing whitespace is removed, matching what lookup services
/// append. The text is kept as sent once it parses as an address.
pub fn parse_ip_body(body: &str) -> Result<String> {
    let ip_text = body.trim_end();

    ip_text
        .parse::<IpAddr>()
        .map_err(|_| Error::network(format!("Invalid IP address in response: {:?}", ip_text)))?;

    Ok(ip_text.to_string())
}

/// Reduce a path-like resource id to its last segment
///
/// `/hostedzone/ABC123` becomes `ABC123`; an id without `/` is returned as is.
pub fn strip_resource_prefix(resource_id: &str) -> &str {
    match resource_id.rfind('/') {
        Some(pos) => &resource_id[pos + 1..],
        None => resource_id,
    }
}
