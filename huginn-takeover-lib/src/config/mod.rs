mod loader;
mod resolver;
mod root;
mod scan;
mod sources;
mod telemetry;

pub use loader::{load_from_path, load_from_str, validate_config};
pub use resolver::ResolverConfig;
pub use root::Config;
pub use scan::{EvidenceSource, ScanConfig, Scheme};
pub use sources::{FingerprintSourceConfig, OutputConfig};
pub use telemetry::LoggingConfig;
