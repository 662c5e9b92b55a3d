//! Input source discovery and reading
//!
//! Every run reads each input once into memory. The same bytes feed the cache
//! fingerprint and the parser, so a cached result always matches what was read.

use std::fs;
use std::path::{Path, PathBuf};

use super::cache::{Fingerprint, FingerprintBuilder};
use super::coerce::LoadDiagnostics;
use super::error::{LoadError, LoadResult, SourceKind};
use super::loader::{load_recipes, load_sales, load_shipments, LoadedTables};
use super::month::{month_label_from_path, normalize_month_label};
use crate::config::Config;

/// One month of sales
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSource {
    pub path: PathBuf,
    /// Explicit month tag; the file name is used when absent
    pub month: Option<String>,
}

impl SalesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            month: None,
        }
    }

    pub fn tagged(path: impl Into<PathBuf>, month: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            month: Some(month.into()),
        }
    }

    pub fn month_label(&self) -> String {
        match &self.month {
            Some(tag) => normalize_month_label(tag),
            None => month_label_from_path(&self.path),
        }
    }
}

/// The full set of inputs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub sales: Vec<SalesSource>,
    pub recipes: PathBuf,
    pub shipments: PathBuf,
}

impl DataSources {
    pub fn new(sales: Vec<SalesSource>, recipes: impl Into<PathBuf>, shipments: impl Into<PathBuf>) -> Self {
        Self {
            sales,
            recipes: recipes.into(),
            shipments: shipments.into(),
        }
    }

    /// List the monthly sales files in the configured directory
    ///
    /// A missing directory or one without CSV files is fatal: averaging over no months
    /// would report every ingredient as unused.
    pub fn discover(config: &Config) -> LoadResult<Self> {
        let sales_dir = &config.sales_dir;
        if !sales_dir.is_dir() {
            return Err(LoadError::missing(SourceKind::Sales, sales_dir));
        }

        let entries = fs::read_dir(sales_dir).map_err(|e| LoadError::Io {
            path: sales_dir.clone(),
            error: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::Io {
                path: sales_dir.clone(),
                error: e,
            })?;
            let path = entry.path();
            if path.is_file() && is_csv(&path) {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(LoadError::missing(SourceKind::Sales, sales_dir.join("*.csv")));
        }
        paths.sort();

        Ok(Self::new(
            paths.into_iter().map(SalesSource::new).collect(),
            &config.recipe_file,
            &config.shipment_file,
        ))
    }

    /// Read every input into memory
    pub fn read(&self) -> LoadResult<SourceSnapshot> {
        if self.sales.is_empty() {
            return Err(LoadError::missing(SourceKind::Sales, "<no sales files>"));
        }

        let mut sales = Vec::with_capacity(self.sales.len());
        for source in &self.sales {
            let file = read_source(SourceKind::Sales, &source.path)?;
            sales.push((source.month_label(), file));
        }

        Ok(SourceSnapshot {
            sales,
            recipes: read_source(SourceKind::Recipes, &self.recipes)?,
            shipments: read_source(SourceKind::Shipments, &self.shipments)?,
        })
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Raw bytes of one input file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn origin(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn read_source(kind: SourceKind, path: &Path) -> LoadResult<SourceFile> {
    if !path.is_file() {
        return Err(LoadError::missing(kind, path));
    }
    let bytes = fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        error: e,
    })?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        bytes,
    })
}

/// All inputs of one run, read and ready to parse
#[derive(Debug, Clone)]
pub struct SourceSnapshot {
    /// (month label, file)
    pub sales: Vec<(String, SourceFile)>,
    pub recipes: SourceFile,
    pub shipments: SourceFile,
}

impl SourceSnapshot {
    /// Content fingerprint over every file's path, month label and bytes
    pub fn fingerprint(&self) -> Fingerprint {
        let mut builder = FingerprintBuilder::new();
        for (month, file) in &self.sales {
            builder.add("sales", month.as_bytes());
            builder.add(&file.path.to_string_lossy(), &file.bytes);
        }
        builder.add(&self.recipes.path.to_string_lossy(), &self.recipes.bytes);
        builder.add(&self.shipments.path.to_string_lossy(), &self.shipments.bytes);
        builder.finish()
    }

    /// Parse the snapshot into normalized tables
    pub fn load(&self) -> LoadResult<LoadedTables> {
        let mut diagnostics = LoadDiagnostics::default();

        let mut sales = Vec::new();
        for (month, file) in &self.sales {
            let records = load_sales(file.bytes.as_slice(), month, &file.origin(), &mut diagnostics)?;
            sales.extend(records);
        }

        let recipes = load_recipes(
            self.recipes.bytes.as_slice(),
            &self.recipes.origin(),
            &mut diagnostics,
        )?;
        let shipments = load_shipments(
            self.shipments.bytes.as_slice(),
            &self.shipments.origin(),
            &mut diagnostics,
        )?;

        tracing::info!(
            "Loaded {} sales rows from {} files, {} recipes, {} shipments ({} malformed values)",
            sales.len(),
            self.sales.len(),
            recipes.rows.len(),
            shipments.len(),
            diagnostics.malformed_values.len()
        );

        Ok(LoadedTables {
            sales,
            recipes,
            shipments,
            diagnostics,
        })
    }
}
