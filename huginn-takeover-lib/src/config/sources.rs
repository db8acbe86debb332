use serde::Deserialize;
use std::path::PathBuf;

/// Fingerprint catalog source
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FingerprintSourceConfig {
    /// Path to a `fingerprints.json` file (can-i-take-over-xyz format)
    /// When unset, the catalog bundled with the library is used
    /// Default: None
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Report output
#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// JSON report destination; no report is written when unset
    /// Default: None
    #[serde(default)]
    pub path: Option<PathBuf>,
}
