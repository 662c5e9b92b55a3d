//! Sale record model
//!
//! One row of a monthly sales export: how many of a menu item sold and for how much.

use serde::{Deserialize, Serialize};

/// A single sales line for one menu item category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Menu item category, the join key against the recipe table
    pub item_category: String,
    /// Number of items sold (coerced, malformed values are 0)
    pub count: f64,
    /// Sales amount in dollars (coerced, malformed values are 0)
    pub amount: f64,
    /// Normalized month label, e.g. "May"
    pub month: String,
}

impl SaleRecord {
    pub fn new(item_category: impl Into<String>, count: f64, amount: f64, month: impl Into<String>) -> Self {
        Self {
            item_category: item_category.into(),
            count,
            amount,
            month: month.into(),
        }
    }
}
