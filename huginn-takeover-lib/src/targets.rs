use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};

/// Where the subdomains to scan come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// One target per line
    File(PathBuf),
    /// Comma-separated list
    List(String),
}

impl TargetSource {
    /// Load the targets; an empty result is an error
    pub fn load(&self) -> Result<Vec<String>> {
        let targets = match self {
            TargetSource::File(path) => from_file(path)?,
            TargetSource::List(list) => from_list(list),
        };
        if targets.is_empty() {
            return Err(ScanError::NoTargets);
        }
        Ok(targets)
    }
}

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let txt = fs::read_to_string(path).map_err(|e| {
        ScanError::Targets(format!("Failed to read targets file {}: {e}", path.display()))
    })?;
    Ok(clean(txt.lines()))
}

pub fn from_list(list: &str) -> Vec<String> {
    clean(list.split(','))
}

fn clean<'a>(entries: impl Iterator<Item = &'a str>) -> Vec<String> {
    entries
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
