//! Takeover fingerprint catalog.
//!
//! The catalog is loaded once before any target is dispatched and is never mutated
//! afterwards. Workers share it through an `Arc` without any locking.

mod loader;
mod types;

pub use loader::{load_from_path, BUNDLED_FINGERPRINTS};
pub use types::{Fingerprint, Signature};

use std::sync::Arc;

/// Ordered, immutable list of fingerprints
///
/// Order is significant: the matcher walks the catalog front to back and the first
/// confirmed fingerprint decides the outcome, so more specific signatures belong first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<Arc<Fingerprint>>,
}

impl Catalog {
    pub fn new(fingerprints: Vec<Fingerprint>) -> Self {
        Self { entries: fingerprints.into_iter().map(Arc::new).collect() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Fingerprint>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Fingerprint>> {
        self.entries.get(index)
    }
}

impl FromIterator<Fingerprint> for Catalog {
    fn from_iter<I: IntoIterator<Item = Fingerprint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
