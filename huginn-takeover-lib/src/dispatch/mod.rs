//! Bounded worker pool running the detection pipeline across many targets.
//!
//! One feeder task fills a bounded work queue and closes it once every target is queued.
//! A fixed set of workers drains the queue and sends one outcome per target into the
//! result channel. The calling task is the single aggregator: it drains the results in
//! arrival order until every worker has exited.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use crate::config::ScanConfig;
use crate::detection::{Detector, ScanOutcome};
use crate::telemetry::progress;

/// Work queue slots on top of one per worker
const EXTRA_QUEUE_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Number of workers; values below 1 are raised to 1
    pub concurrency: usize,
    /// Discard everything but VULNERABLE outcomes
    pub only_vulnerable: bool,
    /// Emit progress lines for VULNERABLE outcomes only
    pub hide_fails: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self { concurrency: 10, only_vulnerable: false, hide_fails: false }
    }
}

impl From<&ScanConfig> for DispatchOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            only_vulnerable: config.only_vulnerable,
            hide_fails: config.hide_fails,
        }
    }
}

pub struct Dispatcher<D> {
    detector: Arc<D>,
    options: DispatchOptions,
}

impl<D: Detector + 'static> Dispatcher<D> {
    pub fn new(detector: Arc<D>, options: DispatchOptions) -> Self {
        Self { detector, options }
    }

    /// Scans every target and returns the kept outcomes in arrival order
    ///
    /// Returns once each target has produced exactly one outcome and all workers have
    /// exited. Blank targets are skipped; duplicates are scanned independently.
    pub async fn run(&self, targets: Vec<String>) -> Vec<ScanOutcome> {
        let concurrency = self.options.concurrency.max(1);
        let (work_tx, work_rx) = mpsc::channel::<String>(concurrency + EXTRA_QUEUE_CAPACITY);
        let (result_tx, mut result_rx) = mpsc::channel::<ScanOutcome>(concurrency);
        let work_rx = Arc::new(Mutex::new(work_rx));

        let mut workers = JoinSet::new();
        for id in 0..concurrency {
            workers.spawn(worker(
                id,
                Arc::clone(&self.detector),
                Arc::clone(&work_rx),
                result_tx.clone(),
            ));
        }
        drop(result_tx);

        let feeder = tokio::spawn(feed(targets, work_tx));

        let mut kept = Vec::new();
        let mut received = 0usize;
        while let Some(outcome) = result_rx.recv().await {
            received += 1;
            progress::report(&outcome, self.options.hide_fails);
            if !self.options.only_vulnerable || outcome.status().is_vulnerable() {
                kept.push(outcome);
            }
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "scan worker terminated abnormally");
            }
        }
        match feeder.await {
            Ok(queued) if queued != received => {
                error!(queued, received, "outcome count does not match queued targets")
            }
            Ok(queued) => debug!(queued, kept = kept.len(), "dispatch complete"),
            Err(e) => error!(error = %e, "target feeder terminated abnormally"),
        }

        kept
    }
}

/// Convenience wrapper around [`Dispatcher::run`]
pub async fn run<D: Detector + 'static>(
    targets: Vec<String>,
    detector: Arc<D>,
    options: DispatchOptions,
) -> Vec<ScanOutcome> {
    Dispatcher::new(detector, options).run(targets).await
}

/// Queues every non-blank target, then closes the queue by dropping the sender
async fn feed(targets: Vec<String>, queue: mpsc::Sender<String>) -> usize {
    let mut queued = 0;
    for target in targets {
        let target = target.trim();
        if target.is_empty() {
            continue;
        }
        if queue.send(target.to_string()).await.is_err() {
            break;
        }
        queued += 1;
    }
    queued
}

async fn worker<D: Detector>(
    id: usize,
    detector: Arc<D>,
    queue: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<ScanOutcome>,
) {
    let mut processed = 0usize;
    loop {
        let next = queue.lock().await.recv().await;
        let Some(target) = next else {
            break;
        };
        let outcome = detector.detect(&target).await;
        processed += 1;
        if results.send(outcome).await.is_err() {
            break;
        }
    }
    trace!(worker = id, processed, "worker exiting");
}
