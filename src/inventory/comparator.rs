//! Supply vs usage comparison
//!
//! Normalizes each shipment schedule to a monthly quantity and classifies it against
//! the ingredient's average monthly usage.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::names::IngredientNameMap;
use super::units::{
    frequency_multiplier, usage_units_per_shipment_unit, DAYS_PER_MONTH,
    UNBOUNDED_DAYS_OF_SUPPLY,
};
use crate::models::{ComparisonRow, DataIssue, ShipmentFrequency, ShipmentSchedule, SupplyStatus};

// ============================================================================
// Status Thresholds (days of supply, lower bound inclusive of the next bucket)
// ============================================================================

pub const CRITICAL_BELOW_DAYS: f64 = 5.0;
pub const LOW_BELOW_DAYS: f64 = 10.0;
pub const GOOD_BELOW_DAYS: f64 = 45.0;

/// Classify days of supply into a status bucket
pub fn classify_days_of_supply(days: f64) -> SupplyStatus {
    if days < CRITICAL_BELOW_DAYS {
        SupplyStatus::Critical
    } else if days < LOW_BELOW_DAYS {
        SupplyStatus::Low
    } else if days < GOOD_BELOW_DAYS {
        SupplyStatus::Good
    } else {
        SupplyStatus::Overstocked
    }
}

// ============================================================================
// Monthly Quantity Normalization
// ============================================================================

/// Shipments arriving per month, undefined for unrecognized cadences
pub fn shipments_per_month(shipment: &ShipmentSchedule) -> Option<f64> {
    frequency_multiplier(&shipment.frequency).map(|m| m * shipment.shipments_per_period)
}

/// Quantity arriving per month in recipe units (pounds converted to grams)
pub fn monthly_quantity(shipment: &ShipmentSchedule) -> Option<f64> {
    shipments_per_month(shipment).map(|per_month| {
        shipment.quantity_per_shipment * per_month * usage_units_per_shipment_unit(&shipment.unit)
    })
}

// ============================================================================
// Comparison
// ============================================================================

/// Look up average usage for a shipment ingredient, recording why it fell back to 0
fn lookup_usage(
    ingredient_name: &str,
    average_usage: &BTreeMap<String, f64>,
    name_map: &IngredientNameMap,
    issues: &mut Vec<DataIssue>,
) -> f64 {
    let column = match name_map.usage_column(ingredient_name) {
        Some(column) => column,
        None => {
            tracing::warn!("No usage mapping for shipment ingredient '{}'", ingredient_name);
            issues.push(DataIssue::UnmappedIngredient);
            return 0.0;
        }
    };

    match average_usage.get(column) {
        Some(usage) => *usage,
        None => {
            tracing::warn!(
                "Usage column '{}' for '{}' not found in recipe table",
                column,
                ingredient_name
            );
            issues.push(DataIssue::MissingUsageColumn {
                column: column.to_string(),
            });
            0.0
        }
    }
}

/// Build the comparison row for one shipment
pub fn compare_shipment(
    shipment: &ShipmentSchedule,
    average_usage: &BTreeMap<String, f64>,
    name_map: &IngredientNameMap,
) -> ComparisonRow {
    let mut issues = Vec::new();

    let monthly_supply = monthly_quantity(shipment);
    if monthly_supply.is_none() {
        let value = match &shipment.frequency {
            ShipmentFrequency::Unknown(raw) => raw.clone(),
            _ => String::new(),
        };
        issues.push(DataIssue::UnrecognizedFrequency { value });
    }

    let usage = lookup_usage(&shipment.ingredient_name, average_usage, name_map, &mut issues);
    let difference = monthly_supply.map(|supply| supply - usage);

    let (utilization_percent, days_of_supply) = if usage > 0.0 {
        match monthly_supply {
            Some(supply) => {
                let utilization = if supply > 0.0 {
                    (usage / supply) * 100.0
                } else {
                    0.0
                };
                (Some(utilization), Some(supply / (usage / DAYS_PER_MONTH)))
            }
            None => (None, None),
        }
    } else {
        (Some(0.0), Some(UNBOUNDED_DAYS_OF_SUPPLY))
    };

    ComparisonRow {
        ingredient_name: shipment.ingredient_name.clone(),
        unit_label: shipment.unit.label().to_string(),
        monthly_supply,
        average_monthly_usage: usage,
        difference,
        utilization_percent,
        days_of_supply,
        status: days_of_supply.map(classify_days_of_supply),
        issues,
    }
}

/// Compare every shipment against average usage, in shipment table order
pub fn compare_supply(
    shipments: &[ShipmentSchedule],
    average_usage: &BTreeMap<String, f64>,
    name_map: &IngredientNameMap,
) -> Vec<ComparisonRow> {
    shipments
        .iter()
        .map(|s| compare_shipment(s, average_usage, name_map))
        .collect()
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort key for comparison tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSort {
    /// Ascending, most urgent first
    DaysOfSupply,
    /// Ascending, largest shortfall first
    Difference,
    /// Descending, most utilized first
    Utilization,
}

impl ComparisonSort {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "days_of_supply" | "days" => Some(ComparisonSort::DaysOfSupply),
            "difference" | "gap" => Some(ComparisonSort::Difference),
            "utilization" | "utilization_percent" => Some(ComparisonSort::Utilization),
            _ => None,
        }
    }
}

/// Undefined values always sort last
fn cmp_defined(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.total_cmp(&x)
            } else {
                x.total_cmp(&y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn sort_comparison(rows: &mut [ComparisonRow], by: ComparisonSort) {
    rows.sort_by(|a, b| {
        let primary = match by {
            ComparisonSort::DaysOfSupply => cmp_defined(a.days_of_supply, b.days_of_supply, false),
            ComparisonSort::Difference => cmp_defined(a.difference, b.difference, false),
            ComparisonSort::Utilization => {
                cmp_defined(a.utilization_percent, b.utilization_percent, true)
            }
        };
        primary.then_with(|| a.ingredient_name.cmp(&b.ingredient_name))
    });
}
