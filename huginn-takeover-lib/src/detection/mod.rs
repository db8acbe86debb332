//! Per-target takeover detection.
//!
//! [`Pipeline`] chains a [`Resolve`] implementation, a [`Probe`] implementation and the
//! [`Matcher`]. Both network stages sit behind traits so they can be swapped for stubs.

mod matcher;
mod outcome;
mod pipeline;
mod prober;
mod resolver;

pub use matcher::{Evidence, EvidenceKind, MatchResult, Matcher};
pub use outcome::{ScanOutcome, ScanStatus};
pub use pipeline::Pipeline;
pub use prober::{build_url, HttpProber, Probe, ProbeErrorKind, ProbeResult};
pub use resolver::{DnsResolver, Resolution, Resolve};

use async_trait::async_trait;

/// Anything that turns one target into one outcome
///
/// The dispatcher drives implementations of this trait from many workers at once.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, target: &str) -> ScanOutcome;
}
