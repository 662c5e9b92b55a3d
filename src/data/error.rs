//! Loader error types

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Which input table a source provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Sales,
    Recipes,
    Shipments,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Sales => write!(f, "sales table"),
            SourceKind::Recipes => write!(f, "recipe table"),
            SourceKind::Shipments => write!(f, "shipment table"),
        }
    }
}

/// Structural problems that halt a run
///
/// Data-quality problems (malformed numbers, unmapped names) never surface here; they
/// are absorbed with defaults and reported through diagnostics instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing input: expected {kind} at {}", .path.display())]
    MissingInput { kind: SourceKind, path: PathBuf },

    #[error("Missing required column '{column}' in {origin}")]
    MissingColumn { origin: String, column: String },

    #[error("Failed to read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("CSV error in {origin}: {error}")]
    Csv {
        origin: String,
        #[source]
        error: csv::Error,
    },

    #[error("Invalid ingredient name map: {0}")]
    NameMap(#[from] serde_json::Error),

    #[error("Analysis cache lock poisoned")]
    CachePoisoned,
}

impl LoadError {
    pub fn missing(kind: SourceKind, path: impl Into<PathBuf>) -> Self {
        LoadError::MissingInput {
            kind,
            path: path.into(),
        }
    }
}

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
