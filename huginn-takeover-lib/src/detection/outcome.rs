use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::Fingerprint;

/// Terminal state of the detection pipeline for one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScanStatus {
    /// The name has no DNS record; nothing was probed
    #[serde(rename = "not found")]
    NotFound,
    /// The DNS lookup itself failed
    #[serde(rename = "resolution error")]
    ResolutionError,
    /// The probe could not reach the target
    #[serde(rename = "http error")]
    HttpError,
    /// The probe connected but the body could not be read
    #[serde(rename = "response error")]
    ResponseError,
    #[serde(rename = "vulnerable")]
    Vulnerable,
    #[serde(rename = "not vulnerable")]
    NotVulnerable,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::NotFound => "not found",
            ScanStatus::ResolutionError => "resolution error",
            ScanStatus::HttpError => "http error",
            ScanStatus::ResponseError => "response error",
            ScanStatus::Vulnerable => "vulnerable",
            ScanStatus::NotVulnerable => "not vulnerable",
        }
    }

    /// Upper-case label used in progress lines
    pub fn label(&self) -> &'static str {
        match self {
            ScanStatus::NotFound => "NOT FOUND",
            ScanStatus::ResolutionError => "RESOLUTION ERROR",
            ScanStatus::HttpError => "HTTP ERROR",
            ScanStatus::ResponseError => "RESPONSE ERROR",
            ScanStatus::Vulnerable => "VULNERABLE",
            ScanStatus::NotVulnerable => "NOT VULNERABLE",
        }
    }

    pub fn is_vulnerable(&self) -> bool {
        matches!(self, ScanStatus::Vulnerable)
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ScanStatus::ResolutionError | ScanStatus::HttpError | ScanStatus::ResponseError
        )
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scanning one target
///
/// Built once by the worker that ran the pipeline and read-only afterwards. The
/// constructors keep status and fingerprint consistent: only [`ScanOutcome::vulnerable`]
/// attaches a fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    target: String,
    status: ScanStatus,
    matched_fingerprint: Option<Arc<Fingerprint>>,
    evidence: Option<String>,
    cname: Option<String>,
    http_status: Option<u16>,
    error: Option<String>,
}

impl ScanOutcome {
    fn bare(target: impl Into<String>, status: ScanStatus) -> Self {
        Self {
            target: target.into(),
            status,
            matched_fingerprint: None,
            evidence: None,
            cname: None,
            http_status: None,
            error: None,
        }
    }

    pub fn not_found(target: impl Into<String>) -> Self {
        Self::bare(target, ScanStatus::NotFound)
    }

    pub fn resolution_error(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::bare(target, ScanStatus::ResolutionError) }
    }

    pub fn http_error(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::bare(target, ScanStatus::HttpError) }
    }

    pub fn response_error(target: impl Into<String>, error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::bare(target, ScanStatus::ResponseError) }
    }

    pub fn vulnerable(
        target: impl Into<String>,
        fingerprint: Arc<Fingerprint>,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            matched_fingerprint: Some(fingerprint),
            evidence: Some(evidence.into()),
            ..Self::bare(target, ScanStatus::Vulnerable)
        }
    }

    pub fn not_vulnerable(target: impl Into<String>, evidence: Option<String>) -> Self {
        Self { evidence, ..Self::bare(target, ScanStatus::NotVulnerable) }
    }

    pub fn with_cname(mut self, cname: Option<String>) -> Self {
        self.cname = cname;
        self
    }

    pub fn with_http_status(mut self, status: Option<u16>) -> Self {
        self.http_status = status;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn matched_fingerprint(&self) -> Option<&Arc<Fingerprint>> {
        self.matched_fingerprint.as_ref()
    }

    pub fn evidence(&self) -> Option<&str> {
        self.evidence.as_deref()
    }

    pub fn cname(&self) -> Option<&str> {
        self.cname.as_deref()
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
