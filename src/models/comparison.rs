//! Supply comparison model
//!
//! The per-ingredient result of comparing normalized monthly supply against average
//! monthly usage.

use serde::{Deserialize, Serialize};

/// Coarse days-of-supply classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SupplyStatus {
    Critical,
    Low,
    Good,
    Overstocked,
}

impl SupplyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyStatus::Critical => "CRITICAL",
            SupplyStatus::Low => "LOW",
            SupplyStatus::Good => "GOOD",
            SupplyStatus::Overstocked => "OVERSTOCKED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "CRITICAL" => Some(SupplyStatus::Critical),
            "LOW" => Some(SupplyStatus::Low),
            "GOOD" => Some(SupplyStatus::Good),
            "OVERSTOCKED" => Some(SupplyStatus::Overstocked),
            _ => None,
        }
    }
}

/// A data-quality fallback applied while building a comparison row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    /// No entry in the ingredient name map; usage taken as 0
    UnmappedIngredient,
    /// Mapped usage column is not in the recipe table; usage taken as 0
    MissingUsageColumn { column: String },
    /// Frequency could not be normalized; monthly supply is undefined
    UnrecognizedFrequency { value: String },
}

/// One row of the supply vs usage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub ingredient_name: String,
    /// Unit label as shipped ("lbs" rows are reported in grams)
    pub unit_label: String,
    /// Monthly quantity; None when the shipment frequency is unrecognized
    pub monthly_supply: Option<f64>,
    pub average_monthly_usage: f64,
    pub difference: Option<f64>,
    pub utilization_percent: Option<f64>,
    /// Days the monthly supply lasts; 999 when usage is zero
    pub days_of_supply: Option<f64>,
    pub status: Option<SupplyStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DataIssue>,
}

impl ComparisonRow {
    /// True when usage fell back to zero because it could not be looked up
    pub fn usage_unavailable(&self) -> bool {
        self.issues.iter().any(|i| {
            matches!(
                i,
                DataIssue::UnmappedIngredient | DataIssue::MissingUsageColumn { .. }
            )
        })
    }

    /// True when the supply side could not be computed
    pub fn supply_undefined(&self) -> bool {
        self.monthly_supply.is_none()
    }
}
