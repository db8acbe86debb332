use async_trait::async_trait;
use tracing::trace;

use super::matcher::{excerpt, Evidence, MatchResult, Matcher};
use super::outcome::ScanOutcome;
use super::prober::{has_scheme, Probe, ProbeErrorKind, ProbeResult};
use super::resolver::{Resolution, Resolve};
use super::Detector;
use crate::config::EvidenceSource;

/// Resolve → probe → match for a single target
///
/// Every call produces exactly one [`ScanOutcome`]. A target without DNS records, or whose
/// lookup fails, is never probed.
pub struct Pipeline<R, P> {
    resolver: R,
    prober: P,
    matcher: Matcher,
    evidence: EvidenceSource,
}

impl<R: Resolve, P: Probe> Pipeline<R, P> {
    pub fn new(resolver: R, prober: P, matcher: Matcher, evidence: EvidenceSource) -> Self {
        Self { resolver, prober, matcher, evidence }
    }

    pub async fn run(&self, target: &str) -> ScanOutcome {
        let name = dns_name(target);

        let (cname, nxdomain) = match self.resolver.resolve(name).await {
            Resolution::NotFound => return ScanOutcome::not_found(target),
            Resolution::Error(e) => return ScanOutcome::resolution_error(target, e),
            Resolution::Dangling { cname, target_unresolvable } => (Some(cname), target_unresolvable),
            Resolution::Direct { .. } => (None, false),
        };
        trace!(target, ?cname, nxdomain, "resolved");

        let (status, body) = match self.prober.probe(target).await {
            ProbeResult::Ok { status, body } => (status, body),
            ProbeResult::Err { kind: ProbeErrorKind::Http, message } => {
                return self.unreachable_outcome(target, cname, nxdomain, message)
            }
            ProbeResult::Err { kind: ProbeErrorKind::Response, message } => {
                return ScanOutcome::response_error(target, message).with_cname(cname)
            }
        };

        let cname_text = cname.as_deref().unwrap_or(name);
        let body_evidence = Evidence::body(&body, Some(status));
        let cname_evidence = Evidence::cname(cname_text);

        let (result, examined) = match self.evidence {
            EvidenceSource::Body => (self.matcher.check(&body_evidence, nxdomain), &body_evidence),
            EvidenceSource::Cname => (self.matcher.check(&cname_evidence, nxdomain), &cname_evidence),
            EvidenceSource::Both => match self.matcher.check(&body_evidence, nxdomain) {
                MatchResult::NotVulnerable if cname.is_some() => {
                    (self.matcher.check(&cname_evidence, nxdomain), &cname_evidence)
                }
                result => (result, &body_evidence),
            },
        };

        let outcome = match result {
            MatchResult::Vulnerable { fingerprint, excerpt } => {
                ScanOutcome::vulnerable(target, fingerprint, excerpt)
            }
            MatchResult::NotVulnerable => {
                let seen = excerpt(examined.text, 0..0);
                ScanOutcome::not_vulnerable(target, (!seen.is_empty()).then_some(seen))
            }
        };
        outcome.with_cname(cname).with_http_status(Some(status))
    }

    /// Outcome for a target whose probe could not connect
    ///
    /// A dangling CNAME whose target has no record cannot answer HTTP at all, so in the
    /// CNAME-aware modes the CNAME alone is checked before settling on HTTP_ERROR.
    fn unreachable_outcome(
        &self,
        target: &str,
        cname: Option<String>,
        nxdomain: bool,
        message: String,
    ) -> ScanOutcome {
        let cname_aware = matches!(self.evidence, EvidenceSource::Cname | EvidenceSource::Both);
        let result = match cname.as_deref() {
            Some(text) if cname_aware && nxdomain => {
                self.matcher.check(&Evidence::cname(text), nxdomain)
            }
            _ => MatchResult::NotVulnerable,
        };
        if let MatchResult::Vulnerable { fingerprint, excerpt } = result {
            return ScanOutcome::vulnerable(target, fingerprint, excerpt).with_cname(cname);
        }
        ScanOutcome::http_error(target, message).with_cname(cname)
    }
}

#[async_trait]
impl<R: Resolve, P: Probe> Detector for Pipeline<R, P> {
    async fn detect(&self, target: &str) -> ScanOutcome {
        self.run(target).await
    }
}

/// Host part of a target that may carry a scheme, port or path
pub(crate) fn dns_name(target: &str) -> &str {
    let rest = if has_scheme(target) {
        target.split_once("://").map_or(target, |(_, rest)| rest)
    } else {
        target
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host = host.rsplit_once('@').map_or(host, |(_, h)| h);
    match host.rsplit_once(':') {
        Some((h, port)) if port.chars().all(|c| c.is_ascii_digit()) => h,
        _ => host,
    }
}
