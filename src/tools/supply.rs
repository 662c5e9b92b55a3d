//! Supply MCP Tools
//!
//! Shipment supply against average usage.

use serde::Serialize;

use crate::data::InventoryStore;
use crate::inventory::{sort_comparison, supply_insights, ComparisonSort, SupplyInsights};
use crate::models::{ComparisonRow, SupplyStatus};

/// Response for get_supply_comparison
#[derive(Debug, Serialize)]
pub struct SupplyComparisonResponse {
    pub rows: Vec<ComparisonRow>,
    pub total: usize,
    pub months_observed: usize,
}

/// Get the supply vs usage table, in shipment order unless sorted
pub fn get_supply_comparison(
    store: &InventoryStore,
    sort_by: Option<&str>,
    status: Option<&str>,
) -> Result<SupplyComparisonResponse, String> {
    let sort = sort_by
        .map(|s| {
            ComparisonSort::from_str(s).ok_or_else(|| {
                format!(
                    "Invalid sort_by '{}'. Use days_of_supply, difference, or utilization",
                    s
                )
            })
        })
        .transpose()?;
    let status = status
        .map(|s| {
            SupplyStatus::from_str(s).ok_or_else(|| {
                format!("Invalid status '{}'. Use CRITICAL, LOW, GOOD, or OVERSTOCKED", s)
            })
        })
        .transpose()?;

    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;

    let mut rows: Vec<ComparisonRow> = analysis
        .comparison
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == Some(s)))
        .cloned()
        .collect();
    if let Some(sort) = sort {
        sort_comparison(&mut rows, sort);
    }

    Ok(SupplyComparisonResponse {
        total: rows.len(),
        rows,
        months_observed: analysis.usage.monthly.len(),
    })
}

/// Get status counts, alerts and data issues
pub fn get_supply_insights(store: &InventoryStore) -> Result<SupplyInsights, String> {
    store
        .with_analysis(|analysis| supply_insights(&analysis.comparison))
        .map_err(|e| format!("Failed to load inventory data: {}", e))
}
