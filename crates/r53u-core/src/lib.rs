// # r53u-core
//
// Core library for the Route 53 record updater.
//
// ## Architecture Overview
//
// This library provides everything except the provider and IP lookup
// implementations:
// - **UpdaterConfig**: Credentials file loading and first-run repair
// - **IpSource**: Trait for discovering the public IP address
// - **DnsProvider**: Trait for zone lookup and record upsert
// - **Updater**: Runs the single, strictly sequential update pass
// - **Reporter**: Human-readable progress on standard output
//
// ## Design Principles
//
// 1. **One pass**: Each invocation updates exactly one record set, once
// 2. **No retries**: Every failure is terminal and surfaces as exit status 1
// 3. **Library-First**: The binary is glue around this crate

pub mod traits;
pub mod updater;
pub mod config;
pub mod error;
pub mod record;
pub mod report;

// Re-export core types for convenience
pub use traits::{DnsProvider, IpSource};
pub use updater::{Updater, UpdateOutcome};
pub use config::{Credentials, UpdaterConfig};
pub use error::{Error, Result};
pub use record::{ChangeInfo, RecordRequest, ZoneHandle};
pub use report::Reporter;
