use serde::Deserialize;

/// DNS resolver configuration
///
/// Name servers come from the system configuration (`/etc/resolv.conf` on Unix).
/// Each query is attempted exactly once.
#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Per-query timeout in seconds
    /// Must be > 0
    /// Default: 5
    #[serde(default = "default_resolver_timeout")]
    pub timeout_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { timeout_secs: default_resolver_timeout() }
    }
}

fn default_resolver_timeout() -> u64 {
    5
}
