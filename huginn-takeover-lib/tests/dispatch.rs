mod helpers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use helpers::{targets, TrackingDetector};
use huginn_takeover_lib::detection::ScanStatus;
use huginn_takeover_lib::dispatch::{self, DispatchOptions, Dispatcher};

fn options(concurrency: usize, only_vulnerable: bool) -> DispatchOptions {
    DispatchOptions { concurrency, only_vulnerable, hide_fails: true }
}

#[tokio::test]
async fn test_one_outcome_per_target_with_fewer_workers() {
    let names: Vec<String> = (0..25).map(|i| format!("host-{i}.example.com")).collect();
    let detector = Arc::new(TrackingDetector::new(Duration::from_millis(5)));

    let outcomes = Dispatcher::new(Arc::clone(&detector), options(3, false)).run(names.clone()).await;

    assert_eq!(outcomes.len(), names.len());
    assert_eq!(detector.calls(), names.len());
    assert!(detector.peak() <= 3, "peak concurrency {}", detector.peak());

    let mut seen: Vec<&str> = outcomes.iter().map(|o| o.target()).collect();
    seen.sort_unstable();
    let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_more_workers_than_targets() {
    let detector = Arc::new(TrackingDetector::new(Duration::from_millis(1)));
    let outcomes = dispatch::run(
        targets(&["a.example.com", "b.example.com"]),
        Arc::clone(&detector),
        options(16, false),
    )
    .await;
    assert_eq!(outcomes.len(), 2);
}

#[tokio::test]
async fn test_empty_target_list() {
    let detector = Arc::new(TrackingDetector::new(Duration::ZERO));
    let outcomes = dispatch::run(Vec::new(), Arc::clone(&detector), options(4, false)).await;
    assert!(outcomes.is_empty());
    assert_eq!(detector.calls(), 0);
}

#[tokio::test]
async fn test_only_vulnerable_filters_results() {
    let list = targets(&[
        "vuln-1.example.com",
        "ok-1.example.com",
        "vuln-2.example.com",
        "ok-2.example.com",
        "ok-3.example.com",
    ]);
    let detector = Arc::new(TrackingDetector::new(Duration::from_millis(1)));

    let outcomes = dispatch::run(list.clone(), Arc::clone(&detector), options(2, true)).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.status() == ScanStatus::Vulnerable));
    assert_eq!(detector.calls(), list.len());
}

#[tokio::test]
async fn test_duplicates_and_blanks() {
    let list = targets(&["dup.example.com", "  ", "dup.example.com", "", " other.example.com "]);
    let detector = Arc::new(TrackingDetector::new(Duration::ZERO));

    let outcomes = dispatch::run(list, Arc::clone(&detector), options(2, false)).await;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for outcome in &outcomes {
        *counts.entry(outcome.target()).or_default() += 1;
    }
    assert_eq!(outcomes.len(), 3);
    assert_eq!(counts.get("dup.example.com"), Some(&2));
    assert_eq!(counts.get("other.example.com"), Some(&1));
}

#[tokio::test]
async fn test_zero_concurrency_still_completes() {
    let detector = Arc::new(TrackingDetector::new(Duration::ZERO));
    let outcomes =
        dispatch::run(targets(&["a.example.com"]), Arc::clone(&detector), options(0, false)).await;
    assert_eq!(outcomes.len(), 1);
}
