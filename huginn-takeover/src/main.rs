#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use huginn_takeover_lib::config::{load_from_path, validate_config, Config};
use huginn_takeover_lib::{scan, telemetry, EvidenceSource, TargetSource};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Huginn subdomain takeover scanner")]
struct Cli {
    /// Path to configuration TOML file; built-in defaults are used when omitted
    #[arg(short, long, value_name = "FILE", env = "HUGINN_TAKEOVER_CONFIG")]
    config: Option<PathBuf>,

    /// File with one target per line
    #[arg(short = 'l', long, value_name = "FILE", conflicts_with = "target")]
    targets: Option<PathBuf>,

    /// Comma-separated targets
    #[arg(short, long, value_name = "LIST")]
    target: Option<String>,

    /// Number of concurrent workers
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// HTTP probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Probe over HTTPS when a target has no scheme
    #[arg(long)]
    https: bool,

    /// Reject invalid TLS certificates
    #[arg(long)]
    verify_tls: bool,

    /// Keep only vulnerable targets in the results
    #[arg(long = "vuln")]
    only_vulnerable: bool,

    /// Print progress lines for vulnerable targets only
    #[arg(long)]
    hide_fails: bool,

    /// Evidence inspected by the matcher: body, cname or both
    #[arg(long, value_name = "SOURCE")]
    evidence: Option<EvidenceSource>,

    /// Fingerprint catalog (fingerprints.json); the bundled catalog is used otherwise
    #[arg(long, value_name = "FILE", env = "HUGINN_TAKEOVER_FINGERPRINTS")]
    fingerprints: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(n) = self.concurrency {
            cfg.scan.concurrency = n;
        }
        if let Some(secs) = self.timeout {
            cfg.scan.timeout_secs = secs;
        }
        cfg.scan.https |= self.https;
        cfg.scan.verify_tls |= self.verify_tls;
        cfg.scan.only_vulnerable |= self.only_vulnerable;
        cfg.scan.hide_fails |= self.hide_fails;
        if let Some(evidence) = self.evidence {
            cfg.scan.evidence = evidence;
        }
        if let Some(path) = &self.fingerprints {
            cfg.fingerprints.path = Some(path.clone());
        }
        if let Some(path) = &self.output {
            cfg.output.path = Some(path.clone());
        }
    }

    fn target_source(&self) -> Option<TargetSource> {
        match (&self.targets, &self.target) {
            (Some(path), _) => Some(TargetSource::File(path.clone())),
            (None, Some(list)) => Some(TargetSource::List(list.clone())),
            (None, None) => None,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => match load_from_path(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("failed to load configuration: {err}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    cli.apply(&mut cfg);

    if let Err(err) = telemetry::init_from_config(&cfg.logging) {
        eprintln!("failed to initialize tracing: {err}");
        std::process::exit(1);
    }

    if let Err(err) = validate_config(&cfg) {
        error!(%err, "invalid configuration");
        std::process::exit(1);
    }

    let Some(source) = cli.target_source() else {
        error!("no targets given; use --targets <FILE> or --target <LIST>");
        std::process::exit(1);
    };
    let targets = match source.load() {
        Ok(targets) => targets,
        Err(err) => {
            error!(%err, "failed to load targets");
            std::process::exit(1);
        }
    };

    match scan::run(&cfg, targets).await {
        Ok(outcomes) => info!(results = outcomes.len(), "done"),
        Err(err) => {
            error!(%err, "scan aborted");
            std::process::exit(1);
        }
    }
}
