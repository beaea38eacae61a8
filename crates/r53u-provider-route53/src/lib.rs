// # Route 53 DNS Provider
//
// This crate provides the AWS Route 53 implementation of `DnsProvider`,
// built on the official `aws-sdk-route53` client.
//
// ## Behavior
//
// - Zone lookup: one `ListHostedZonesByName` call, exact name match required
// - Record upsert: one `ChangeResourceRecordSets` call carrying a single
//   UPSERT of a single-value record set
// - NO retry or backoff: the SDK's retry layer is disabled
// - Dry-run mode: the zone lookup runs, the change is only logged
//
// ## Security Requirements
//
// - The secret key NEVER appears in logs or errors
// - Credentials come from the config file only, never from the
//   environment or instance metadata

use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::config::http::HttpResponse;
use aws_sdk_route53::config::retry::RetryConfig;
use aws_sdk_route53::config::timeout::TimeoutConfig;
use aws_sdk_route53::config::{BehaviorVersion, Region};
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ChangeStatus, ResourceRecord, ResourceRecordSet, RrType,
};
use r53u_core::traits::DnsProvider;
use r53u_core::{ChangeInfo, Credentials, Error, RecordRequest, Result, ZoneHandle};
use std::fmt;
use std::time::Duration;

/// Route 53 API base URL
pub const ROUTE53_ENDPOINT: &str = "https://route53.amazonaws.com";

/// Route 53 is a global service signed in us-east-1
const SIGNING_REGION: &str = "us-east-1";

/// Default timeout for each API operation (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER_NAME: &str = "route53";

/// Name the SDK reports for credentials taken from the config file
const CREDENTIALS_SOURCE: &str = "route53-updater-config";

/// Route 53 DNS provider
///
/// Stateless and single-shot: one API call per trait method.
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider will:
/// - Perform the zone lookup
/// - Log the change it would submit
/// - **NOT** submit the change
pub struct Route53Provider {
    /// SDK client holding the credentials
    client: Client,

    /// API base URL, for logs
    endpoint: String,

    /// Dry-run mode: if true, look up the zone but skip the change
    dry_run: bool,
}

impl Route53Provider {
    /// Create a provider talking to `endpoint` (normally [`ROUTE53_ENDPOINT`])
    ///
    /// Fails when either credential is empty.
    pub fn new(credentials: Credentials, endpoint: impl Into<String>) -> Result<Self> {
        if credentials.access_key.is_empty() || credentials.secret_key.is_empty() {
            return Err(Error::config("AWS access and secret keys are required"));
        }

        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let config = aws_sdk_route53::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(SIGNING_REGION))
            .credentials_provider(aws_sdk_route53::config::Credentials::new(
                credentials.access_key,
                credentials.secret_key,
                None,
                None,
                CREDENTIALS_SOURCE,
            ))
            .endpoint_url(endpoint.as_str())
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(DEFAULT_HTTP_TIMEOUT)
                    .build(),
            )
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            endpoint,
            dry_run: false,
        })
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl fmt::Debug for Route53Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route53Provider")
            .field("endpoint", &self.endpoint)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

/// Map a Route 53 error answer to an error
///
/// `code` is the AWS error code (e.g., `InvalidChangeBatch`).
pub fn map_service_error(status: u16, code: Option<&str>, message: Option<&str>) -> Error {
    let code = code.unwrap_or("Unknown");
    let detail = format!(
        "{}: {} (HTTP {})",
        code,
        message.unwrap_or("no message"),
        status
    );

    match (status, code) {
        (401 | 403, _) => Error::auth(detail),
        (404, _) => Error::not_found(detail),
        (429, _) | (_, "Throttling" | "ThrottlingException") => Error::rate_limited(detail),
        _ => Error::provider(PROVIDER_NAME, detail),
    }
}

/// Map an SDK failure: service answers by status and code, the rest as transport errors
fn map_sdk_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    if let SdkError::ServiceError(service) = &err {
        return map_service_error(
            service.raw().status().as_u16(),
            service.err().code(),
            service.err().message(),
        );
    }

    Error::http(format!(
        "Route 53 request failed: {}",
        DisplayErrorContext(&err)
    ))
}

fn build_error(e: impl fmt::Display) -> Error {
    Error::invalid_input(format!("Invalid record set: {}", e))
}

/// Normalize a zone name for comparison: lowercase, trailing dot
fn normalize_zone_name(name: &str) -> String {
    let mut name = name.to_ascii_lowercase();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}

/// Build the single-change UPSERT batch for a record
pub fn upsert_batch(record: &RecordRequest) -> Result<ChangeBatch> {
    let value = ResourceRecord::builder()
        .value(record.value.as_str())
        .build()
        .map_err(build_error)?;

    let record_set = ResourceRecordSet::builder()
        .name(record.record_name.as_str())
        .r#type(RrType::from(record.record_type.as_str()))
        .ttl(i64::from(record.ttl))
        .resource_records(value)
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .changes(change)
        .build()
        .map_err(build_error)
}

#[async_trait]
impl DnsProvider for Route53Provider {
    /// Look up the hosted zone by exact name
    async fn find_zone(&self, zone_name: &str) -> Result<ZoneHandle> {
        tracing::debug!("Looking up hosted zone {} at {}", zone_name, self.endpoint);

        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(zone_name)
            .max_items(1)
            .send()
            .await
            .map_err(map_sdk_error)?;

        // The listing starts at the name, so a later zone may come back instead
        let wanted = normalize_zone_name(zone_name);
        let zone = output
            .hosted_zones()
            .iter()
            .find(|zone| normalize_zone_name(zone.name()) == wanted)
            .ok_or_else(|| Error::not_found(format!("Zone not found: {}", zone_name)))?;

        let handle = ZoneHandle::new(zone_name, zone.id());
        tracing::debug!("Found zone ID: {}", handle.zone_id);
        Ok(handle)
    }

    /// Submit one UPSERT change
    async fn upsert_record(&self, zone: &ZoneHandle, record: &RecordRequest) -> Result<ChangeInfo> {
        tracing::info!(
            "Upserting Route 53 record: {} {} -> {} (ttl {}) [mode: {}]",
            record.record_name,
            record.record_type,
            record.value,
            record.ttl,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let batch = upsert_batch(record)?;

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would submit change to zone {}: {}",
                zone.zone_id,
                serde_json::json!({
                    "action": "UPSERT",
                    "name": record.record_name,
                    "type": record.record_type,
                    "ttl": record.ttl,
                    "value": record.value,
                })
            );
            return Ok(ChangeInfo {
                id: "dry-run".to_string(),
                status: "DRY-RUN".to_string(),
            });
        }

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone.zone_id.as_str())
            .change_batch(batch)
            .send()
            .await
            .map_err(map_sdk_error)?;

        let info: Option<&aws_sdk_route53::types::ChangeInfo> = output.change_info().into();
        let info = info.ok_or_else(|| {
            Error::provider(PROVIDER_NAME, "Invalid response format: ChangeInfo missing")
        })?;
        let status: Option<&ChangeStatus> = info.status().into();

        let change = ChangeInfo {
            id: r53u_core::record::strip_resource_prefix(info.id()).to_string(),
            status: status.map_or("UNKNOWN", ChangeStatus::as_str).to_string(),
        };
        tracing::info!("Change accepted: {} ({})", change.id, change.status);
        Ok(change)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
