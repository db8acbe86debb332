use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use crate::config::LoggingConfig;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(
    log_level: &str,
    show_target: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(show_target);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to set global tracing subscriber: {e}"))?;

    Ok(())
}

pub fn init_from_config(
    config: &LoggingConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing(&config.level, config.show_target)
}
