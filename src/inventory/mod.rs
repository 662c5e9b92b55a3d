//! Inventory analysis
//!
//! Pure computations over loaded tables: sales → ingredient usage → supply comparison,
//! plus the summaries built on top of them.

pub mod comparator;
pub mod insights;
pub mod names;
pub mod sales;
pub mod units;
pub mod usage;

use serde::Serialize;

use crate::data::LoadedTables;
use crate::models::ComparisonRow;

pub use comparator::{
    classify_days_of_supply, compare_shipment, compare_supply, monthly_quantity,
    shipments_per_month, sort_comparison, ComparisonSort,
};
pub use insights::{supply_insights, top_ingredients, usage_trend, Ranking, SupplyInsights};
pub use names::{canonical_column, IngredientNameMap};
pub use sales::{summarize_sales, SalesSummary};
pub use usage::{calculate_usage, MonthlyUsage, UsageReport};

/// Everything computed from one set of inputs
#[derive(Debug, Clone, Serialize)]
pub struct InventoryAnalysis {
    pub tables: LoadedTables,
    pub usage: UsageReport,
    pub comparison: Vec<ComparisonRow>,
    pub sales: SalesSummary,
}

/// Run the full pipeline over loaded tables
pub fn analyze(tables: LoadedTables, name_map: &IngredientNameMap) -> InventoryAnalysis {
    let usage = calculate_usage(&tables.sales, &tables.recipes);
    let comparison = compare_supply(&tables.shipments, &usage.average_monthly_usage, name_map);
    let sales = summarize_sales(&tables.sales);

    tracing::info!(
        "Analyzed {} months, {} ingredients, {} shipment rows",
        usage.monthly.len(),
        usage.ingredients.len(),
        comparison.len()
    );

    InventoryAnalysis {
        tables,
        usage,
        comparison,
        sales,
    }
}
