//! Credentials file handling
//!
//! The updater reads its AWS credentials from a small INI file:
//!
//! ```text
//! [aws]
//! access_key = <string>
//! secret_key = <string>
//!
//! [route53]
//! default_ttl = 300
//! ```
//!
//! When the file is missing or cannot be used, it is rewritten with
//! placeholder values and owner-only permissions, and loading fails with
//! [`Error::Config`]. No provider call is made in that case.

use crate::error::{Error, Result};
use ini::{Ini, ParseOption};
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Placeholder written for credentials on first run
pub const PLACEHOLDER: &str = "replace_me";

/// TTL used when the config file does not provide a usable one
pub const DEFAULT_TTL: u32 = 300;

/// File name looked up next to the executable
pub const DEFAULT_CONFIG_FILE: &str = "aws.cfg";

const AWS_SECTION: &str = "aws";
const ROUTE53_SECTION: &str = "route53";
const ACCESS_KEY: &str = "access_key";
const SECRET_KEY: &str = "secret_key";
const DEFAULT_TTL_KEY: &str = "default_ttl";

/// AWS access/secret key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    /// ⚠️ NEVER log this value
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// True while either key still holds the first-run placeholder
    pub fn is_placeholder(&self) -> bool {
        self.access_key == PLACEHOLDER || self.secret_key == PLACEHOLDER
    }
}

// Custom Debug implementation that hides the secret key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<REDACTED>")
            .finish()
    }
}

/// Why the config file could not be used
#[derive(Debug)]
pub enum LoadFailure {
    /// The file does not exist
    Missing,
    /// The file exists but could not be read
    Unreadable(std::io::Error),
    /// The file is not valid INI
    Malformed(String),
    /// A required `[aws]` key is absent
    MissingKey(&'static str),
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Missing => write!(f, "file does not exist"),
            LoadFailure::Unreadable(e) => write!(f, "file could not be read: {}", e),
            LoadFailure::Malformed(e) => write!(f, "file is malformed: {}", e),
            LoadFailure::MissingKey(key) => write!(f, "[{}] {} is missing", AWS_SECTION, key),
        }
    }
}

/// Parsed config file
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// Where the file was read from
    pub path: PathBuf,

    /// AWS credentials
    pub credentials: Credentials,

    /// TTL applied to the upserted record
    pub default_ttl: u32,
}

impl UpdaterConfig {
    /// Load the config file, repairing it when it cannot be used
    ///
    /// On any [`LoadFailure`] the file is rewritten with placeholder values
    /// and an [`Error::Config`] naming the path is returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        match Self::read(path) {
            Ok(config) => Ok(config),
            Err(failure) => {
                tracing::warn!(
                    "Config file {} cannot be used ({}), writing placeholder values",
                    path.display(),
                    failure
                );
                write_placeholder_file(path)?;
                Err(Error::config(format!(
                    "created config file with placeholder credentials: {}",
                    path.display()
                )))
            }
        }
    }

    /// Parse the config file without side effects
    pub fn read(path: impl AsRef<Path>) -> std::result::Result<Self, LoadFailure> {
        let path = path.as_ref();

        // Values are taken verbatim, like other INI writers leave them.
        // Section and key names match regardless of case.
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };

        let ini = Ini::load_from_file_opt(path, opt).map_err(|e| match e {
            ini::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => LoadFailure::Missing,
            ini::Error::Io(io) => LoadFailure::Unreadable(io),
            ini::Error::Parse(parse) => LoadFailure::Malformed(parse.to_string()),
        })?;

        let aws = ini
            .section(Some(AWS_SECTION))
            .ok_or(LoadFailure::MissingKey(ACCESS_KEY))?;
        let access_key = aws
            .get(ACCESS_KEY)
            .ok_or(LoadFailure::MissingKey(ACCESS_KEY))?;
        let secret_key = aws
            .get(SECRET_KEY)
            .ok_or(LoadFailure::MissingKey(SECRET_KEY))?;

        let default_ttl = match ini
            .section(Some(ROUTE53_SECTION))
            .and_then(|s| s.get(DEFAULT_TTL_KEY))
        {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Ignoring invalid [{}] {} '{}', using {}",
                    ROUTE53_SECTION,
                    DEFAULT_TTL_KEY,
                    raw,
                    DEFAULT_TTL
                );
                DEFAULT_TTL
            }),
            None => DEFAULT_TTL,
        };

        tracing::debug!("Loaded config file {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            credentials: Credentials::new(access_key, secret_key),
            default_ttl,
        })
    }

    /// Reject credentials that were never edited after first run
    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_placeholder() {
            return Err(Error::config(format!(
                "AWS access/secret keys are not set in {}",
                self.path.display()
            )));
        }
        Ok(())
    }
}

/// Default config location: `aws.cfg` beside the running executable
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Write a config file holding placeholder credentials, readable by the owner only
pub fn write_placeholder_file(path: &Path) -> Result<()> {
    let mut ini = Ini::new();
    ini.with_section(Some(AWS_SECTION))
        .set(ACCESS_KEY, PLACEHOLDER)
        .set(SECRET_KEY, PLACEHOLDER);
    ini.with_section(Some(ROUTE53_SECTION))
        .set(DEFAULT_TTL_KEY, DEFAULT_TTL.to_string());

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    ini.write_to(&mut file)?;

    // An existing file keeps its old mode through truncation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
