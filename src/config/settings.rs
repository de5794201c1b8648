//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::eagle::{
    CombinedInstallations, DirectoryScan, EagleVersion, HttpFetcher, Installation,
    LibraryResolver, OfflineFetcher, StaticInstallations, DEFAULT_REMOTE_URL,
};
use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Explicitly listed EAGLE installations.
    #[serde(default)]
    pub installations: Vec<InstallationConfig>,

    /// Directories scanned for `EAGLE-<version>` installations.
    #[serde(default)]
    pub install_roots: Vec<PathBuf>,

    /// Remote library repository settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for install in &self.installations {
            install.parsed_version()?;
        }

        let url = &self.remote.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) || !url.ends_with('/') {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid remote base_url '{url}'. Must be an http(s) URL ending in '/'"
                ),
            });
        }

        if self.remote.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "remote.timeout_secs must be greater than zero".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }

        Ok(())
    }

    /// Builds a library resolver from these settings.
    ///
    /// Explicit installations are listed before scanned ones.
    ///
    /// # Errors
    ///
    /// Returns an error if an installation version does not parse.
    pub fn resolver(&self) -> Result<LibraryResolver, ConfigError> {
        let explicit = self
            .installations
            .iter()
            .map(|i| Ok(Installation::new(i.parsed_version()?, &i.library_dir)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let installations = CombinedInstallations::new()
            .with(StaticInstallations(explicit))
            .with(DirectoryScan::new(&self.install_roots));

        let resolver = if self.remote.enabled {
            LibraryResolver::new(
                installations,
                HttpFetcher::new(self.remote.timeout()),
                &self.remote.base_url,
            )
        } else {
            LibraryResolver::new(installations, OfflineFetcher, &self.remote.base_url)
        };
        Ok(resolver)
    }
}

/// One explicitly configured installation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallationConfig {
    /// EAGLE version, e.g. "6.2".
    pub version: String,

    /// Directory holding that version's `.lbr` files.
    pub library_dir: PathBuf,
}

impl InstallationConfig {
    fn parsed_version(&self) -> Result<EagleVersion, ConfigError> {
        EagleVersion::parse(&self.version).map_err(|_| ConfigError::ValidationError {
            message: format!(
                "Invalid installation version '{}' for {}",
                self.version,
                self.library_dir.display()
            ),
        })
    }
}

/// Remote repository configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Whether the remote repository may be contacted.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL; `<name>.lbr` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for a single fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    /// Returns the fetch timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
