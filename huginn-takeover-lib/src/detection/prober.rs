use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use crate::config::{ScanConfig, Scheme};
use crate::error::{Result, ScanError};

/// Which stage of the probe failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// Connection refused, timeout, TLS handshake failure, ...
    Http,
    /// The response arrived but its body could not be read
    Response,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Ok { status: u16, body: String },
    Err { kind: ProbeErrorKind, message: String },
}

/// One HTTP request against a resolved target
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, host: &str) -> ProbeResult;
}

/// [`Probe`] issuing a single GET through a shared `reqwest` client
///
/// Redirects follow the client default; nothing is retried.
pub struct HttpProber {
    client: reqwest::Client,
    scheme: Scheme,
}

impl HttpProber {
    pub fn new(scheme: Scheme, timeout: Duration, verify_tls: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(|e| ScanError::Client(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, scheme })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(
            config.default_scheme(),
            Duration::from_secs(config.timeout_secs),
            config.verify_tls,
        )
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, host: &str) -> ProbeResult {
        let url = build_url(host, self.scheme);
        trace!(%url, "probing");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return ProbeResult::Err { kind: ProbeErrorKind::Http, message: e.to_string() },
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ProbeResult::Ok { status, body },
            Err(e) => ProbeResult::Err { kind: ProbeErrorKind::Response, message: e.to_string() },
        }
    }
}

/// Prepends `scheme` unless `host` already carries one
pub fn build_url(host: &str, scheme: Scheme) -> String {
    if has_scheme(host) {
        host.to_string()
    } else {
        format!("{scheme}://{host}")
    }
}

pub(crate) fn has_scheme(target: &str) -> bool {
    target.split_once("://").is_some_and(|(prefix, _)| {
        !prefix.is_empty()
            && prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}
