//! Human-readable progress output
//!
//! The reporter writes one line per step to standard output. Diagnostics go
//! through `tracing` instead, so this stream only carries the report.

use crate::record::{RecordRequest, ZoneHandle};
use std::io::{self, Write};
use std::path::Path;

/// Line printed after the change was accepted
pub const SUCCESS_LINE: &str = "Great Success!";

/// Line printed when the change submission failed
pub const FAILURE_LINE: &str = "Failed Hard :(";

/// Progress reporter
pub struct Reporter<W: Write> {
    out: W,
    failure_reported: bool,
}

impl Reporter<io::Stdout> {
    /// Reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            failure_reported: false,
        }
    }

    /// Consume the reporter and return its writer
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn resolving_ip(&mut self, source: &str) {
        self.line(format_args!("Determining my dynamic internet IP ( {} )", source));
    }

    pub fn retrieving_zone(&mut self, zone: &str) {
        self.line(format_args!("Retrieving zone {}", zone));
    }

    pub fn zone_resolved(&mut self, zone: &ZoneHandle) {
        self.line(format_args!("Zone ID is {}", zone.zone_id));
    }

    pub fn setting_record(&mut self, record: &RecordRequest) {
        self.line(format_args!(
            "Setting {} to {{ {} => {} }}",
            record.record_name, record.record_type, record.value
        ));
    }

    pub fn success(&mut self) {
        self.line(format_args!("{}", SUCCESS_LINE));
    }

    pub fn failure(&mut self) {
        self.failure_reported = true;
        self.line(format_args!("{}", FAILURE_LINE));
    }

    /// Whether the failure line has already been printed
    pub fn failure_reported(&self) -> bool {
        self.failure_reported
    }

    /// Tell the operator which file needs real credentials
    pub fn edit_config(&mut self, path: &Path) {
        self.line(format_args!(
            "Please edit the config file and set your AWS access/secret keys."
        ));
        self.line(format_args!("{}", path.display()));
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            tracing::debug!("Failed to write report line: {}", e);
        }
    }
}
