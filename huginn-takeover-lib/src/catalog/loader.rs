use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::types::{Fingerprint, Signature};
use super::Catalog;
use crate::error::{Result, ScanError};

/// Catalog compiled into the library, used when no fingerprint file is configured
pub const BUNDLED_FINGERPRINTS: &str = include_str!("../../data/fingerprints.json");

/// One entry of a can-i-take-over-xyz style `fingerprints.json`
#[derive(Debug, Deserialize)]
struct RawFingerprint {
    service: String,
    #[serde(default)]
    fingerprint: String,
    #[serde(default)]
    nxdomain: bool,
    #[serde(default)]
    vulnerable: bool,
    #[serde(default)]
    cname: Vec<String>,
    #[serde(default)]
    http_status: Option<u16>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    discussion: Option<String>,
}

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Catalog> {
    let path = p.as_ref();
    let txt = fs::read_to_string(path).map_err(|e| {
        ScanError::Catalog(format!("Failed to read fingerprint file {}: {e}", path.display()))
    })?;
    Catalog::from_json(&txt)
}

impl Catalog {
    /// Parses a fingerprint list, keeping file order
    ///
    /// Entries marked not vulnerable, or without a signature, are skipped.
    /// A list with no usable entry is an error.
    pub fn from_json(txt: &str) -> Result<Catalog> {
        let raw: Vec<RawFingerprint> = serde_json::from_str(txt)
            .map_err(|e| ScanError::Catalog(format!("Failed to parse fingerprints: {e}")))?;

        let total = raw.len();
        let mut fingerprints = Vec::with_capacity(total);
        for entry in raw {
            if !entry.vulnerable || entry.fingerprint.trim().is_empty() {
                debug!(service = %entry.service, "skipping non-vulnerable fingerprint");
                continue;
            }
            let signature = Signature::parse(&entry.fingerprint).map_err(|e| {
                ScanError::Catalog(format!("Invalid signature for {}: {e}", entry.service))
            })?;
            fingerprints.push(
                Fingerprint::new(entry.service, signature)
                    .with_nxdomain(entry.nxdomain)
                    .with_cnames(&entry.cname)
                    .with_http_status(entry.http_status)
                    .with_links(entry.documentation, entry.discussion),
            );
        }

        if fingerprints.is_empty() {
            return Err(ScanError::Catalog(format!(
                "No usable fingerprints among {total} entries"
            )));
        }

        debug!(loaded = fingerprints.len(), skipped = total - fingerprints.len(), "catalog parsed");
        Ok(Catalog::new(fingerprints))
    }

    pub fn bundled() -> Result<Catalog> {
        Catalog::from_json(BUNDLED_FINGERPRINTS)
    }
}
