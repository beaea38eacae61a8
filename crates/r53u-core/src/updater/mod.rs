//! Single-record update flow
//!
//! The Updater runs one strictly sequential pass:
//!
//! ```text
//! RecordRequest ──► (IpSource, if value is "dynamic")
//!                        │
//!                        ▼
//!               DnsProvider::find_zone
//!                        │
//!                        ▼
//!             DnsProvider::upsert_record ──► Reporter
//! ```
//!
//! Nothing is retried. A failure before submission propagates unchanged;
//! a failed submission is reported with the generic failure line and its
//! cause is kept in the returned error for logging.

use crate::error::Result;
use crate::record::{ChangeInfo, RecordRequest, ZoneHandle};
use crate::report::Reporter;
use crate::traits::{DnsProvider, IpSource};
use std::io::Write;
use tracing::{debug, error, info};

/// Everything a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The zone the record was written to
    pub zone: ZoneHandle,

    /// The record as submitted (dynamic value already resolved)
    pub record: RecordRequest,

    /// Provider acknowledgement
    pub change: ChangeInfo,
}

/// Runs the lookup → upsert flow for one record
pub struct Updater {
    /// DNS provider for zone lookup and upsert
    provider: Box<dyn DnsProvider>,

    /// Public IP source, consulted only for dynamic values
    ip_source: Box<dyn IpSource>,
}

impl Updater {
    pub fn new(provider: Box<dyn DnsProvider>, ip_source: Box<dyn IpSource>) -> Self {
        Self {
            provider,
            ip_source,
        }
    }

    /// Substitute the public IP when the request asks for it
    pub async fn resolve_value<W: Write>(
        &self,
        request: RecordRequest,
        reporter: &mut Reporter<W>,
    ) -> Result<RecordRequest> {
        if !request.is_dynamic() {
            return Ok(request);
        }

        reporter.resolving_ip(&self.ip_source.describe());
        let ip = self.ip_source.current().await?;

        if request.record_type != crate::record::DEFAULT_RECORD_TYPE {
            info!(
                "Dynamic value overrides record type {} with A",
                request.record_type
            );
        }
        debug!("Public IP is {}", ip);

        Ok(request.with_resolved_ip(ip))
    }

    /// Run the whole flow for one record
    pub async fn run<W: Write>(
        &self,
        request: RecordRequest,
        reporter: &mut Reporter<W>,
    ) -> Result<UpdateOutcome> {
        let record = self.resolve_value(request, reporter).await?;

        reporter.retrieving_zone(&record.zone);
        let zone = self.provider.find_zone(&record.zone).await?;
        reporter.zone_resolved(&zone);
        info!(
            "Resolved zone {} to {} via {}",
            zone.zone_name,
            zone.zone_id,
            self.provider.provider_name()
        );

        reporter.setting_record(&record);
        match self.provider.upsert_record(&zone, &record).await {
            Ok(change) => {
                info!("Change {} submitted ({})", change.id, change.status);
                reporter.success();
                Ok(UpdateOutcome {
                    zone,
                    record,
                    change,
                })
            }
            Err(e) => {
                error!(
                    "Upsert of {} {} failed: {}",
                    record.record_name, record.record_type, e
                );
                reporter.failure();
                Err(e)
            }
        }
    }
}
