//! Per-outcome progress lines, written by the dispatcher's aggregator

use tracing::{info, warn};

use crate::detection::{ScanOutcome, ScanStatus};

/// Emit the progress line for one outcome
///
/// With `hide_fails` only VULNERABLE outcomes are reported.
pub fn report(outcome: &ScanOutcome, hide_fails: bool) {
    let status = outcome.status();
    if hide_fails && !status.is_vulnerable() {
        return;
    }

    let line = classification_line(outcome);
    match status {
        ScanStatus::Vulnerable => {
            let fingerprint = outcome.matched_fingerprint();
            info!(
                target_host = outcome.target(),
                service = fingerprint.map(|f| f.service.as_str()),
                documentation = fingerprint.and_then(|f| f.documentation_url.as_deref()),
                discussion = fingerprint.and_then(|f| f.discussion_url.as_deref()),
                "{line}"
            );
        }
        s if s.is_error() => {
            warn!(target_host = outcome.target(), error = outcome.error(), "{line}")
        }
        _ => info!(target_host = outcome.target(), "{line}"),
    }
}

/// `[LABEL] target`, with the engine name appended for VULNERABLE outcomes
pub fn classification_line(outcome: &ScanOutcome) -> String {
    let label = outcome.status().label();
    match outcome.matched_fingerprint() {
        Some(fp) => format!("[{label}] {} ({})", outcome.target(), fp.service),
        None => format!("[{label}] {}", outcome.target()),
    }
}
