//! Command-line arguments

use clap::Parser;
use r53u_core::RecordRequest;

const EPILOG: &str = "Setting a value of \"dynamic\" will force record type to \"A\" and use this \
hosts public internet facing IP address as the records value.";

/// A simple program to update AWS Route53 DNS records.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "route53-updater", version, about, after_help = EPILOG)]
pub struct Cli {
    /// Zone name. E.G.: example.com.
    #[arg(short = 'z', value_name = "ZONE")]
    pub zone: String,

    /// Record name. E.G.: www.example.com.
    #[arg(short = 'r', value_name = "RECORD")]
    pub record: String,

    /// Record type. E.G.: A, MX, SRV, etc
    #[arg(short = 't', value_name = "TYPE")]
    pub record_type: Option<String>,

    /// Record data. E.G.: IP Address, MX host, dynamic, etc
    #[arg(short = 'v', value_name = "VALUE")]
    pub value: String,
}

impl Cli {
    /// Build the record request, applying the configured TTL
    pub fn into_request(self, ttl: u32) -> r53u_core::Result<RecordRequest> {
        RecordRequest::new(self.zone, self.record, self.record_type, self.value, ttl)
    }
}
