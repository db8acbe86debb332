//! Wires a loaded [`Config`] into a full scan run

use std::sync::Arc;

use tracing::info;

use crate::catalog::{self, Catalog};
use crate::config::Config;
use crate::detection::{DnsResolver, HttpProber, Matcher, Pipeline, ScanOutcome};
use crate::dispatch::{DispatchOptions, Dispatcher};
use crate::error::Result;
use crate::report;

/// Load the catalog named by the config, or the bundled one
pub fn load_catalog(cfg: &Config) -> Result<Catalog> {
    match &cfg.fingerprints.path {
        Some(path) => catalog::load_from_path(path),
        None => Catalog::bundled(),
    }
}

/// Scan `targets` and return the kept outcomes
///
/// The catalog, resolver and HTTP client are all built before any target is dispatched;
/// failing to build one of them aborts the run. Writes the JSON report when an output
/// path is configured.
pub async fn run(cfg: &Config, targets: Vec<String>) -> Result<Vec<ScanOutcome>> {
    let catalog = Arc::new(load_catalog(cfg)?);
    let options = DispatchOptions::from(&cfg.scan);

    info!(
        targets = targets.len(),
        fingerprints = catalog.len(),
        concurrency = options.concurrency,
        timeout_secs = cfg.scan.timeout_secs,
        scheme = %cfg.scan.default_scheme(),
        evidence = ?cfg.scan.evidence,
        only_vulnerable = options.only_vulnerable,
        "starting scan"
    );

    let resolver = DnsResolver::from_system_conf(&cfg.resolver)?;
    let prober = HttpProber::from_config(&cfg.scan)?;
    let pipeline = Pipeline::new(resolver, prober, Matcher::new(catalog), cfg.scan.evidence);

    let outcomes = Dispatcher::new(Arc::new(pipeline), options).run(targets).await;

    let vulnerable = outcomes.iter().filter(|o| o.status().is_vulnerable()).count();
    info!(kept = outcomes.len(), vulnerable, "scan finished");

    if let Some(path) = &cfg.output.path {
        report::write_to_path(path, &outcomes)?;
        info!(path = %path.display(), "report written");
    }

    Ok(outcomes)
}
