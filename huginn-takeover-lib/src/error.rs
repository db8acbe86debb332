use thiserror::Error;

/// Errors that abort a scan run
///
/// Per-target failures (DNS, HTTP, unreadable bodies) are never reported through this type;
/// they are captured as a [`crate::ScanStatus`] on the target's outcome instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fingerprint catalog error: {0}")]
    Catalog(String),

    #[error("Target source error: {0}")]
    Targets(String),

    #[error("Resolver error: {0}")]
    Resolver(String),

    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("No targets to scan")]
    NoTargets,
}

pub type Result<T> = std::result::Result<T, ScanError>;
