//! Test doubles for updater contract tests
//!
//! These doubles record what the updater asked for without talking to
//! any network service.

#![allow(dead_code)]

use r53u_core::error::{Error, Result};
use r53u_core::traits::{DnsProvider, IpSource};
use r53u_core::record::parse_ip_body;
use r53u_core::{ChangeInfo, RecordRequest, Reporter, ZoneHandle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An IpSource that returns the body a lookup service would have sent
pub struct FixedIpSource {
    body: String,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    /// `body` is parsed the way the HTTP source parses a response
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn sharing_counter_with(other: &Self) -> Self {
        Self {
            body: other.body.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        parse_ip_body(&self.body)
    }

    fn describe(&self) -> String {
        "http://ip.test/".to_string()
    }
}

/// An IpSource whose lookup always fails
pub struct FailingIpSource;

#[async_trait::async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<String> {
        Err(Error::network("connection refused"))
    }

    fn describe(&self) -> String {
        "http://unreachable.test/".to_string()
    }
}

/// How the mock provider answers upserts
#[derive(Clone, Copy)]
pub enum UpsertBehavior {
    Accept,
    Reject,
}

/// A mock DnsProvider that records every call
pub struct RecordingProvider {
    zones: Arc<std::sync::Mutex<Vec<String>>>,
    upserts: Arc<std::sync::Mutex<Vec<(ZoneHandle, RecordRequest)>>>,
    resource_id: String,
    behavior: UpsertBehavior,
}

impl RecordingProvider {
    pub fn new(resource_id: &str, behavior: UpsertBehavior) -> Self {
        Self {
            zones: Arc::new(std::sync::Mutex::new(Vec::new())),
            upserts: Arc::new(std::sync::Mutex::new(Vec::new())),
            resource_id: resource_id.to_string(),
            behavior,
        }
    }

    /// Create a provider that shares its call log with an existing one
    pub fn sharing_log_with(other: &Self) -> Self {
        Self {
            zones: Arc::clone(&other.zones),
            upserts: Arc::clone(&other.upserts),
            resource_id: other.resource_id.clone(),
            behavior: other.behavior,
        }
    }

    /// Zone names passed to find_zone()
    pub fn zone_lookups(&self) -> Vec<String> {
        self.zones.lock().unwrap().clone()
    }

    /// Arguments passed to upsert_record()
    pub fn upserts(&self) -> Vec<(ZoneHandle, RecordRequest)> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingProvider {
    async fn find_zone(&self, zone_name: &str) -> Result<ZoneHandle> {
        self.zones.lock().unwrap().push(zone_name.to_string());
        Ok(ZoneHandle::new(zone_name, &self.resource_id))
    }

    async fn upsert_record(&self, zone: &ZoneHandle, record: &RecordRequest) -> Result<ChangeInfo> {
        self.upserts
            .lock()
            .unwrap()
            .push((zone.clone(), record.clone()));

        match self.behavior {
            UpsertBehavior::Accept => Ok(ChangeInfo {
                id: "C2682N5HXP0BZ4".to_string(),
                status: "PENDING".to_string(),
            }),
            UpsertBehavior::Reject => Err(Error::provider(
                "mock",
                "PriorRequestNotComplete: Route 53 is still processing a prior request.",
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A reporter that captures its output
pub fn capture() -> Reporter<Vec<u8>> {
    Reporter::new(Vec::new())
}

/// The text a capturing reporter collected
pub fn captured(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).expect("report is UTF-8")
}
