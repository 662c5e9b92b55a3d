//! Ingredient naming tables
//!
//! Shipments and recipes use different vocabularies, and older recipe exports spell
//! some columns differently. These tables are configuration: the algorithms only see
//! an [`IngredientNameMap`] and [`canonical_column`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{LoadError, LoadResult};

/// Historical recipe column spellings and their canonical names
pub const COLUMN_VARIANTS: &[(&str, &str)] = &[("Boychoy(g)", "Bokchoy(g)")];

/// Shipment ingredient name -> recipe usage column
pub const DEFAULT_INGREDIENT_MAP: &[(&str, &str)] = &[
    ("Beef", "braised beef used (g)"),
    ("Chicken", "Braised Chicken(g)"),
    ("Ramen", "Ramen (count)"),
    ("Rice Noodles", "Rice Noodles(g)"),
    ("Flour", "flour (g)"),
    ("Tapioca Starch", "Tapioca Starch"),
    ("Rice", "Rice(g)"),
    ("Green Onion", "Green Onion"),
    ("White Onion", "White onion"),
    ("Cilantro", "Cilantro"),
    ("Egg", "Egg(count)"),
    ("Peas + Carrot", "Peas(g)"),
    ("Bokchoy", "Bokchoy(g)"),
    ("Chicken Wings", "Chicken Wings (pcs)"),
];

/// Map a recipe column name to its canonical spelling
pub fn canonical_column(name: &str) -> &str {
    let trimmed = name.trim();
    COLUMN_VARIANTS
        .iter()
        .find(|(variant, _)| *variant == trimmed)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(trimmed)
}

/// Lookup from shipment ingredient names to usage columns
///
/// Names without an entry cannot be evaluated and are compared with zero usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientNameMap {
    entries: BTreeMap<String, String>,
}

impl Default for IngredientNameMap {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_INGREDIENT_MAP.iter().copied())
    }
}

impl IngredientNameMap {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.trim().to_string(), canonical_column(v).to_string()))
                .collect(),
        }
    }

    /// Parse a JSON object of `{"Shipment name": "usage column"}`
    pub fn from_json_str(json: &str) -> LoadResult<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            error: e,
        })?;
        Self::from_json_str(&json)
    }

    pub fn usage_column(&self, shipment_name: &str) -> Option<&str> {
        self.entries.get(shipment_name.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_column_remaps_variant() {
        assert_eq!(canonical_column("Boychoy(g)"), "Bokchoy(g)");
        assert_eq!(canonical_column(" Boychoy(g) "), "Bokchoy(g)");
        assert_eq!(canonical_column("Bokchoy(g)"), "Bokchoy(g)");
        assert_eq!(canonical_column("flour (g)"), "flour (g)");
    }

    #[test]
    fn test_default_map_lookups() {
        let map = IngredientNameMap::default();
        assert_eq!(map.len(), DEFAULT_INGREDIENT_MAP.len());
        assert_eq!(map.usage_column("Beef"), Some("braised beef used (g)"));
        assert_eq!(map.usage_column("Peas + Carrot"), Some("Peas(g)"));
        assert_eq!(map.usage_column("Tofu"), None);
    }

    #[test]
    fn test_map_is_case_sensitive() {
        let map = IngredientNameMap::default();
        assert_eq!(map.usage_column("beef"), None);
    }

    #[test]
    fn test_from_json_str() {
        let map = IngredientNameMap::from_json_str(r#"{"Bok Choy": "Boychoy(g)", "Tofu": "tofu (g)"}"#)
            .unwrap();
        assert_eq!(map.usage_column("Bok Choy"), Some("Bokchoy(g)"));
        assert_eq!(map.usage_column("Tofu"), Some("tofu (g)"));
        assert_eq!(map.usage_column("Beef"), None);
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        assert!(IngredientNameMap::from_json_str("[1, 2]").is_err());
    }
}
