//! Shared, memoized access to the analysis
//!
//! Inputs are re-read on every request; the pipeline only re-runs when their
//! fingerprint changes or the cache is invalidated.

use std::sync::{Arc, Mutex};

use super::cache::{AnalysisCache, CacheStats};
use super::error::{LoadError, LoadResult};
use super::sources::DataSources;
use crate::config::Config;
use crate::inventory::{analyze, IngredientNameMap, InventoryAnalysis};

/// Inventory data handle, cheap to clone
#[derive(Clone)]
pub struct InventoryStore {
    config: Arc<Config>,
    name_map: Arc<IngredientNameMap>,
    cache: Arc<Mutex<AnalysisCache<InventoryAnalysis>>>,
}

impl InventoryStore {
    pub fn new(config: Config, name_map: IngredientNameMap) -> Self {
        Self {
            config: Arc::new(config),
            name_map: Arc::new(name_map),
            cache: Arc::new(Mutex::new(AnalysisCache::new())),
        }
    }

    /// Store with the configured (or built-in) name map
    pub fn from_config(config: Config) -> LoadResult<Self> {
        let name_map = config.name_map()?;
        Ok(Self::new(config, name_map))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn name_map(&self) -> &IngredientNameMap {
        &self.name_map
    }

    /// Current analysis, recomputed only when the inputs changed
    pub fn analysis(&self) -> LoadResult<Arc<InventoryAnalysis>> {
        let snapshot = DataSources::discover(&self.config)?.read()?;
        let fingerprint = snapshot.fingerprint();

        let mut cache = self.cache.lock().map_err(|_| LoadError::CachePoisoned)?;
        cache.get_or_compute(fingerprint, || {
            let tables = snapshot.load()?;
            Ok(analyze(tables, &self.name_map))
        })
    }

    /// Execute a closure with the current analysis
    pub fn with_analysis<F, T>(&self, f: F) -> LoadResult<T>
    where
        F: FnOnce(&InventoryAnalysis) -> T,
    {
        let analysis = self.analysis()?;
        Ok(f(&analysis))
    }

    /// Drop the cached analysis and recompute from the inputs
    pub fn reload(&self) -> LoadResult<Arc<InventoryAnalysis>> {
        {
            let mut cache = self.cache.lock().map_err(|_| LoadError::CachePoisoned)?;
            cache.invalidate();
        }
        self.analysis()
    }

    pub fn cache_stats(&self) -> LoadResult<CacheStats> {
        let cache = self.cache.lock().map_err(|_| LoadError::CachePoisoned)?;
        Ok(cache.stats())
    }
}
