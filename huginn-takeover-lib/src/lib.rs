#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod detection;
pub mod dispatch;
pub mod error;
pub mod report;
pub mod scan;
pub mod targets;
pub mod telemetry;

pub use catalog::{Catalog, Fingerprint, Signature};
pub use config::{load_from_path, Config, EvidenceSource};
pub use detection::{Detector, DnsResolver, HttpProber, Matcher, Pipeline, ScanOutcome, ScanStatus};
pub use dispatch::{DispatchOptions, Dispatcher};
pub use error::{Result, ScanError};
pub use scan::run;
pub use targets::TargetSource;
