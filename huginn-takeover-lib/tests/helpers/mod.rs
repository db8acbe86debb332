//! Shared stubs for pipeline and dispatcher tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use huginn_takeover_lib::catalog::{Catalog, Fingerprint, Signature};
use huginn_takeover_lib::detection::{
    Detector, Probe, ProbeErrorKind, ProbeResult, Resolution, Resolve, ScanOutcome,
};

pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Answers from a fixed table; unknown names have no record
#[derive(Default)]
pub struct StubResolver {
    answers: HashMap<String, Resolution>,
}

impl StubResolver {
    pub fn with(mut self, name: &str, resolution: Resolution) -> Self {
        self.answers.insert(name.to_string(), resolution);
        self
    }

    pub fn dangling(self, name: &str, cname: &str, target_unresolvable: bool) -> Self {
        self.with(
            name,
            Resolution::Dangling { cname: cname.to_string(), target_unresolvable },
        )
    }
}

#[async_trait]
impl Resolve for StubResolver {
    async fn resolve(&self, target: &str) -> Resolution {
        self.answers.get(target).cloned().unwrap_or(Resolution::NotFound)
    }
}

/// Answers from a fixed table and counts every call
#[derive(Default)]
pub struct StubProber {
    responses: HashMap<String, ProbeResult>,
    calls: Arc<AtomicUsize>,
}

impl StubProber {
    pub fn ok(mut self, host: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(host.to_string(), ProbeResult::Ok { status, body: body.to_string() });
        self
    }

    pub fn failing(mut self, host: &str, kind: ProbeErrorKind, message: &str) -> Self {
        self.responses
            .insert(host.to_string(), ProbeResult::Err { kind, message: message.to_string() });
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Probe for StubProber {
    async fn probe(&self, host: &str) -> ProbeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses.get(host).cloned().unwrap_or(ProbeResult::Err {
            kind: ProbeErrorKind::Http,
            message: "connection refused".to_string(),
        })
    }
}

/// Detector that tracks how many detections run at once
///
/// Targets starting with `vuln` come back VULNERABLE, everything else NOT_VULNERABLE.
pub struct TrackingDetector {
    fingerprint: Arc<Fingerprint>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl TrackingDetector {
    pub fn new(delay: Duration) -> Self {
        Self {
            fingerprint: Arc::new(Fingerprint::new("AWS S3", Signature::substring("NoSuchBucket"))),
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Detector for TrackingDetector {
    async fn detect(&self, target: &str) -> ScanOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if target.starts_with("vuln") {
            ScanOutcome::vulnerable(target, Arc::clone(&self.fingerprint), "NoSuchBucket")
        } else {
            ScanOutcome::not_vulnerable(target, None)
        }
    }
}

/// Small catalog: an S3 body signature and an NXDOMAIN-gated Azure signature
pub fn test_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::new(vec![
        Fingerprint::new("AWS S3", Signature::substring("NoSuchBucket"))
            .with_cnames(["amazonaws"]),
        Fingerprint::new("Microsoft Azure", Signature::substring("404 Web Site not found"))
            .with_nxdomain(true)
            .with_cnames(["azurewebsites.net"]),
    ]))
}

pub fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
