use serde::Deserialize;

use super::resolver::ResolverConfig;
use super::scan::ScanConfig;
use super::sources::{FingerprintSourceConfig, OutputConfig};
use super::telemetry::LoggingConfig;

/// Main configuration structure
///
/// Every section is optional; an empty file yields the same values as [`Config::default`].
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Scan behaviour: concurrency, probe policy, result filtering
    #[serde(default)]
    pub scan: ScanConfig,
    /// DNS resolver settings
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Where the fingerprint catalog is read from
    #[serde(default)]
    pub fingerprints: FingerprintSourceConfig,
    /// Report destination (optional)
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
