// # route53-updater
//
// Sets one Route 53 record to a given value, or to this host's public IP
// when the value is `dynamic`, then exits.
//
// This binary is a thin integration layer:
// 1. Reading runtime settings from environment variables
// 2. Loading (or creating) the credentials file
// 3. Parsing the command line
// 4. Wiring the Route 53 provider and HTTP IP source into the updater
//
// All update logic lives in r53u-core.
//
// ## Configuration
//
// Credentials and the record TTL come from an INI file (`aws.cfg` beside the
// executable by default):
//
// ```ini
// [aws]
// access_key = AKIA...
// secret_key = ...
// [route53]
// default_ttl = 300
// ```
//
// Runtime settings come from environment variables:
// - `ROUTE53_UPDATER_CONFIG`: Path to the config file
// - `ROUTE53_UPDATER_IP_URL`: Public IP lookup URL (default http://ipinfo.io/ip)
// - `ROUTE53_UPDATER_ENDPOINT`: Route 53 API base URL
// - `ROUTE53_UPDATER_MODE`: Set to `dry-run` to skip the change submission
// - `ROUTE53_UPDATER_LOG_LEVEL`: trace, debug, info, warn (default), error
//
// ## Example
//
// ```bash
// route53-updater -z example.com. -r home.example.com. -v dynamic
// ```

mod cli;
mod settings;

use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use r53u_core::{Reporter, Updater, UpdaterConfig};
use r53u_ip_http::HttpIpSource;
use r53u_provider_route53::Route53Provider;
use settings::Settings;
use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes
///
/// Every failure shares status 1, whatever its cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdaterExitCode {
    /// Record updated (or dry-run completed)
    Success = 0,
    /// Configuration, argument, network or provider failure
    Failure = 1,
}

impl From<UpdaterExitCode> for ExitCode {
    fn from(code: UpdaterExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let settings = Settings::from_env();

    if let Err(e) = settings.validate() {
        eprintln!("Configuration validation error: {}", e);
        return UpdaterExitCode::Failure.into();
    }

    // Diagnostics go to stderr; stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_max_level(settings.level().unwrap_or(tracing::Level::WARN))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return UpdaterExitCode::Failure.into();
    }

    let mut reporter = Reporter::stdout();
    run(&settings, std::env::args_os(), &mut reporter).into()
}

/// One full pass: config, command line, then the update itself
fn run<W: Write>(
    settings: &Settings,
    args: impl IntoIterator<Item = OsString>,
    reporter: &mut Reporter<W>,
) -> UpdaterExitCode {
    // Config is settled before the command line is looked at
    let config = match UpdaterConfig::load(&settings.config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            reporter.edit_config(&settings.config_path);
            return UpdaterExitCode::Failure;
        }
    };

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => UpdaterExitCode::Success,
                _ => UpdaterExitCode::Failure,
            };
        }
    };

    if let Err(e) = config.validate() {
        debug!("{}", e);
        reporter.edit_config(&config.path);
        return UpdaterExitCode::Failure;
    }

    let request = match cli.into_request(config.default_ttl) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {}", e);
            return UpdaterExitCode::Failure;
        }
    };

    // One sequential pass; nothing runs concurrently
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            return UpdaterExitCode::Failure;
        }
    };
    let _guard = rt.enter();

    let provider = match Route53Provider::new(config.credentials, settings.endpoint.as_str()) {
        Ok(provider) => provider.with_dry_run(settings.dry_run),
        Err(e) => {
            eprintln!("error: {}", e);
            return UpdaterExitCode::Failure;
        }
    };
    let ip_source = match HttpIpSource::new(settings.ip_url.as_str()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {}", e);
            return UpdaterExitCode::Failure;
        }
    };
    let updater = Updater::new(Box::new(provider), Box::new(ip_source));

    match rt.block_on(updater.run(request, reporter)) {
        Ok(outcome) => {
            info!(
                "{} {} set in zone {} (change {})",
                outcome.record.record_name,
                outcome.record.record_type,
                outcome.zone.zone_id,
                outcome.change.id
            );
            UpdaterExitCode::Success
        }
        // A failed submission was already reported and logged by the updater
        Err(_) if reporter.failure_reported() => UpdaterExitCode::Failure,
        Err(e) => {
            if e.is_provider_error() {
                error!("Route 53 request failed: {}", e);
            }
            eprintln!("error: {}", e);
            UpdaterExitCode::Failure
        }
    }
}
