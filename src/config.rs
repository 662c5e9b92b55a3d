//! Runtime configuration
//!
//! Input locations come from environment variables, falling back to a `data/`
//! directory next to the project root.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::LoadResult;
use crate::inventory::IngredientNameMap;

pub const ENV_DATA_DIR: &str = "ISM_DATA_DIR";
pub const ENV_SALES_DIR: &str = "ISM_SALES_DIR";
pub const ENV_RECIPE_FILE: &str = "ISM_RECIPE_FILE";
pub const ENV_SHIPMENT_FILE: &str = "ISM_SHIPMENT_FILE";
pub const ENV_NAME_MAP: &str = "ISM_NAME_MAP";

pub const DEFAULT_SALES_DIR: &str = "csv_files";
pub const DEFAULT_RECIPE_FILE: &str = "Ingredient.csv";
pub const DEFAULT_SHIPMENT_FILE: &str = "Shipment.csv";

/// Where the input tables live
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub sales_dir: PathBuf,
    pub recipe_file: PathBuf,
    pub shipment_file: PathBuf,
    /// Optional JSON file replacing the built-in ingredient name map
    pub name_map_file: Option<PathBuf>,
}

impl Config {
    /// Standard layout under one data directory
    pub fn from_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            sales_dir: data_dir.join(DEFAULT_SALES_DIR),
            recipe_file: data_dir.join(DEFAULT_RECIPE_FILE),
            shipment_file: data_dir.join(DEFAULT_SHIPMENT_FILE),
            name_map_file: None,
            data_dir,
        }
    }

    /// Resolve from the environment
    pub fn from_env() -> Self {
        let data_dir = std::env::var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let mut config = Self::from_data_dir(data_dir);
        if let Ok(dir) = std::env::var(ENV_SALES_DIR) {
            config.sales_dir = PathBuf::from(dir);
        }
        if let Ok(file) = std::env::var(ENV_RECIPE_FILE) {
            config.recipe_file = PathBuf::from(file);
        }
        if let Ok(file) = std::env::var(ENV_SHIPMENT_FILE) {
            config.shipment_file = PathBuf::from(file);
        }
        config.name_map_file = std::env::var(ENV_NAME_MAP).ok().map(PathBuf::from);
        config
    }

    /// The configured ingredient name map, or the built-in one
    pub fn name_map(&self) -> LoadResult<IngredientNameMap> {
        match &self.name_map_file {
            Some(path) => IngredientNameMap::from_json_file(path),
            None => Ok(IngredientNameMap::default()),
        }
    }
}

/// `data/` beside the project root, found from the executable location
fn default_data_dir() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path
}
