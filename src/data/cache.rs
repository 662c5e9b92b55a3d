//! Memoization of pipeline results
//!
//! Results are keyed by a SHA-256 fingerprint of the inputs. A changed input yields a
//! new fingerprint and a recomputation; [`AnalysisCache::invalidate`] forces one.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::LoadResult;

/// Hex-encoded SHA-256 of a run's inputs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental fingerprint over labelled byte blocks
pub struct FingerprintBuilder {
    hasher: Sha256,
}

impl Default for FingerprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Add a labelled block; lengths are hashed too so block boundaries matter
    pub fn add(&mut self, label: &str, bytes: &[u8]) -> &mut Self {
        self.hasher.update((label.len() as u64).to_le_bytes());
        self.hasher.update(label.as_bytes());
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(hex::encode(self.hasher.finalize()))
    }
}

/// Cache counters for status reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub current_fingerprint: Option<Fingerprint>,
}

/// Single-entry cache of the latest result
pub struct AnalysisCache<T> {
    entry: Option<(Fingerprint, Arc<T>)>,
    stats: CacheStats,
}

impl<T> Default for AnalysisCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnalysisCache<T> {
    pub fn new() -> Self {
        Self {
            entry: None,
            stats: CacheStats::default(),
        }
    }

    /// Return the cached value for `fingerprint`, computing and storing it on a miss
    ///
    /// A failed computation leaves the previous entry untouched.
    pub fn get_or_compute<F>(&mut self, fingerprint: Fingerprint, compute: F) -> LoadResult<Arc<T>>
    where
        F: FnOnce() -> LoadResult<T>,
    {
        if let Some((cached, value)) = &self.entry {
            if *cached == fingerprint {
                self.stats.hits += 1;
                return Ok(Arc::clone(value));
            }
        }

        self.stats.misses += 1;
        tracing::info!("Analysis cache miss, computing for inputs {}", fingerprint);
        let value = Arc::new(compute()?);
        self.stats.current_fingerprint = Some(fingerprint.clone());
        self.entry = Some((fingerprint, Arc::clone(&value)));
        Ok(value)
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            tracing::info!("Analysis cache invalidated");
        }
        self.stats.invalidations += 1;
        self.stats.current_fingerprint = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
