use std::fmt;

use serde::Deserialize;

/// Scan configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    /// Number of concurrent workers for the whole run
    /// Must be > 0
    /// Default: 10
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Per-probe HTTP timeout in seconds
    /// Must be > 0
    /// Default: 10
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Use HTTPS when a target carries no scheme prefix
    /// Default: false (plain HTTP)
    #[serde(default)]
    pub https: bool,
    /// Only accept probes to endpoints presenting a valid certificate
    /// Decommissioned third-party endpoints frequently serve invalid certificates,
    /// so verification is off unless requested
    /// Default: false
    #[serde(default)]
    pub verify_tls: bool,
    /// Keep only VULNERABLE outcomes in the final result set
    /// Default: false
    #[serde(default)]
    pub only_vulnerable: bool,
    /// Print progress lines only for VULNERABLE outcomes
    /// Default: false
    #[serde(default)]
    pub hide_fails: bool,
    /// Which string the matcher inspects: "body", "cname" or "both"
    /// Default: "body"
    #[serde(default)]
    pub evidence: EvidenceSource,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout(),
            https: false,
            verify_tls: false,
            only_vulnerable: false,
            hide_fails: false,
            evidence: EvidenceSource::default(),
        }
    }
}

impl ScanConfig {
    pub fn default_scheme(&self) -> Scheme {
        if self.https {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }
}

/// URL scheme prepended to targets that do not carry one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence handed to the matcher after a successful probe
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceSource {
    /// The HTTP response body
    #[default]
    Body,
    /// The CNAME target (or the host itself when it has no CNAME)
    Cname,
    /// The body first, then the CNAME target when the body decided nothing
    Both,
}

impl std::str::FromStr for EvidenceSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "body" => Ok(EvidenceSource::Body),
            "cname" => Ok(EvidenceSource::Cname),
            "both" => Ok(EvidenceSource::Both),
            other => Err(format!("unknown evidence source: {other} (expected body, cname or both)")),
        }
    }
}

fn default_concurrency() -> usize {
    10
}

fn default_timeout() -> u64 {
    10
}
