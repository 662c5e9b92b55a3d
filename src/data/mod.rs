//! Data module
//!
//! Reads the input tables, coerces their values, and memoizes analysis results.

pub mod cache;
pub mod coerce;
pub mod error;
pub mod loader;
pub mod month;
pub mod sources;
pub mod store;

pub use cache::{AnalysisCache, CacheStats, Fingerprint};
pub use coerce::{LoadDiagnostics, MalformedValue};
pub use error::{LoadError, LoadResult, SourceKind};
pub use loader::{load_recipes, load_sales, load_shipments, LoadedTables};
pub use sources::{DataSources, SalesSource, SourceSnapshot};
pub use store::InventoryStore;
