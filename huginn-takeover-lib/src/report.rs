//! JSON report of the kept scan outcomes

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::detection::{ScanOutcome, ScanStatus};
use crate::error::{Result, ScanError};

/// One report record
#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub subdomain: &'a str,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> From<&'a ScanOutcome> for ReportEntry<'a> {
    fn from(outcome: &'a ScanOutcome) -> Self {
        let fingerprint = outcome.matched_fingerprint();
        Self {
            subdomain: outcome.target(),
            status: outcome.status(),
            engine: fingerprint.map(|f| f.service.as_str()),
            documentation: fingerprint.and_then(|f| f.documentation_url.as_deref()),
            discussion: fingerprint.and_then(|f| f.discussion_url.as_deref()),
            cname: outcome.cname(),
            http_status: outcome.http_status(),
            evidence: outcome.evidence(),
            error: outcome.error(),
        }
    }
}

pub fn to_json(outcomes: &[ScanOutcome]) -> Result<String> {
    let entries: Vec<ReportEntry<'_>> = outcomes.iter().map(ReportEntry::from).collect();
    serde_json::to_string_pretty(&entries)
        .map_err(|e| ScanError::Report(format!("Failed to serialize report: {e}")))
}

pub fn write_to_path<P: AsRef<Path>>(path: P, outcomes: &[ScanOutcome]) -> Result<()> {
    let path = path.as_ref();
    let json = to_json(outcomes)?;
    fs::write(path, json)
        .map_err(|e| ScanError::Report(format!("Failed to write report {}: {e}", path.display())))
}
