//! Recipe model
//!
//! Per-item ingredient quantities. One row per menu item category, one column per
//! ingredient (grams or count, depending on the column).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ingredient quantities used by one menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub item_category: String,
    /// Ingredient column name -> quantity per item sold
    pub quantities: BTreeMap<String, f64>,
}

impl RecipeRow {
    pub fn new(item_category: impl Into<String>) -> Self {
        Self {
            item_category: item_category.into(),
            quantities: BTreeMap::new(),
        }
    }

    /// Builder-style helper for fixtures
    pub fn with(mut self, ingredient: impl Into<String>, quantity: f64) -> Self {
        self.quantities.insert(ingredient.into(), quantity);
        self
    }

    /// Quantity of an ingredient per item; absent ingredients are 0
    pub fn quantity(&self, ingredient: &str) -> f64 {
        self.quantities.get(ingredient).copied().unwrap_or(0.0)
    }
}

/// The full recipe table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeTable {
    /// Canonical ingredient column names in file order
    pub ingredient_columns: Vec<String>,
    pub rows: Vec<RecipeRow>,
}

impl RecipeTable {
    pub fn new(ingredient_columns: Vec<String>, rows: Vec<RecipeRow>) -> Self {
        Self {
            ingredient_columns,
            rows,
        }
    }

    /// Find the recipe for a category by exact name
    pub fn get(&self, item_category: &str) -> Option<&RecipeRow> {
        self.rows.iter().find(|r| r.item_category == item_category)
    }

    /// Index rows by category for joining
    pub fn index(&self) -> BTreeMap<&str, &RecipeRow> {
        let mut index = BTreeMap::new();
        for row in &self.rows {
            index.entry(row.item_category.as_str()).or_insert(row);
        }
        index
    }

    pub fn has_ingredient(&self, column: &str) -> bool {
        self.ingredient_columns.iter().any(|c| c == column)
    }
}
