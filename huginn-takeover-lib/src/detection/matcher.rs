use std::ops::Range;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{Catalog, Fingerprint};

/// Bytes of context kept on each side of a matched signature
const EXCERPT_CONTEXT: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceKind {
    /// HTTP response body, matched against signatures
    Body,
    /// CNAME target, matched against CNAME patterns
    Cname,
}

/// The string a verdict is drawn from
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub kind: EvidenceKind,
    pub text: &'a str,
    /// Status code of the probe that produced a body
    pub http_status: Option<u16>,
}

impl<'a> Evidence<'a> {
    pub fn body(text: &'a str, http_status: Option<u16>) -> Self {
        Self { kind: EvidenceKind::Body, text, http_status }
    }

    pub fn cname(text: &'a str) -> Self {
        Self { kind: EvidenceKind::Cname, text, http_status: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Vulnerable { fingerprint: Arc<Fingerprint>, excerpt: String },
    NotVulnerable,
}

impl MatchResult {
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, MatchResult::Vulnerable { .. })
    }

    pub fn fingerprint(&self) -> Option<&Arc<Fingerprint>> {
        match self {
            MatchResult::Vulnerable { fingerprint, .. } => Some(fingerprint),
            MatchResult::NotVulnerable => None,
        }
    }
}

/// Decides whether evidence proves a takeover
///
/// Fingerprints are tried in catalog order. A fingerprint whose signature occurs in the
/// evidence is a candidate; a candidate that requires NXDOMAIN is only confirmed when the
/// caller reports the dangling record as unresolvable. The first confirmed candidate wins.
/// Unconfirmed candidates never make a target vulnerable.
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn check(&self, evidence: &Evidence<'_>, nxdomain: bool) -> MatchResult {
        for fingerprint in self.catalog.iter() {
            let Some(span) = candidate_span(fingerprint, evidence) else {
                continue;
            };
            if fingerprint.requires_nxdomain && !nxdomain {
                debug!(
                    service = %fingerprint.service,
                    "signature present but the record still resolves"
                );
                continue;
            }
            return MatchResult::Vulnerable {
                fingerprint: Arc::clone(fingerprint),
                excerpt: excerpt(evidence.text, span),
            };
        }
        MatchResult::NotVulnerable
    }
}

fn candidate_span(fingerprint: &Fingerprint, evidence: &Evidence<'_>) -> Option<Range<usize>> {
    match evidence.kind {
        EvidenceKind::Body => {
            if let Some(expected) = fingerprint.http_status {
                if evidence.http_status != Some(expected) {
                    return None;
                }
            }
            fingerprint.signature.find(evidence.text)
        }
        EvidenceKind::Cname => fingerprint.find_cname(evidence.text),
    }
}

/// `span` plus [`EXCERPT_CONTEXT`] bytes each side, cut on char boundaries
pub(crate) fn excerpt(text: &str, span: Range<usize>) -> String {
    let mut start = span.start.saturating_sub(EXCERPT_CONTEXT);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = span.end.saturating_add(EXCERPT_CONTEXT).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    text[start..end].trim().to_string()
}
