use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, ScanError};

pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| ScanError::Config(format!("Failed to read config file: {e}")))?;
    load_from_str(&txt)
}

pub fn load_from_str(txt: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(txt)
        .map_err(|e| ScanError::Config(format!("Failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.scan.concurrency == 0 {
        return Err(ScanError::Config("concurrency must be > 0".into()));
    }
    if cfg.scan.timeout_secs == 0 {
        return Err(ScanError::Config("timeout_secs must be > 0".into()));
    }
    if cfg.resolver.timeout_secs == 0 {
        return Err(ScanError::Config("resolver timeout_secs must be > 0".into()));
    }

    if let Some(path) = &cfg.fingerprints.path {
        if !path.exists() {
            return Err(ScanError::Config(format!(
                "Fingerprint file not found: {}",
                path.display()
            )));
        }
    }

    Ok(())
}
