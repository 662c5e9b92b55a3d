//! Sales MCP Tools

use serde::Serialize;

use crate::data::{InventoryStore, LoadDiagnostics};
use crate::inventory::sales::{ItemSales, MonthlySales};

/// Response for get_sales_summary
#[derive(Debug, Serialize)]
pub struct SalesSummaryResponse {
    pub total_revenue: f64,
    pub total_items_sold: f64,
    pub average_item_price: Option<f64>,
    pub top_by_revenue: Vec<ItemSales>,
    pub top_by_count: Vec<ItemSales>,
    pub by_month: Vec<MonthlySales>,
}

/// Get revenue totals and best sellers
pub fn get_sales_summary(store: &InventoryStore, top: usize) -> Result<SalesSummaryResponse, String> {
    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;
    let summary = &analysis.sales;

    Ok(SalesSummaryResponse {
        total_revenue: summary.total_revenue,
        total_items_sold: summary.total_items_sold,
        average_item_price: summary.average_item_price,
        top_by_revenue: summary.top_by_revenue(top).into_iter().cloned().collect(),
        top_by_count: summary.top_by_count(top).into_iter().cloned().collect(),
        by_month: summary.by_month.clone(),
    })
}

/// Response for get_load_diagnostics
#[derive(Debug, Serialize)]
pub struct LoadDiagnosticsResponse {
    pub sales_rows: usize,
    pub recipe_rows: usize,
    pub shipment_rows: usize,
    pub months: Vec<String>,
    pub clean: bool,
    pub diagnostics: LoadDiagnostics,
    pub unmatched_categories: Vec<String>,
}

/// Get row counts and every value that was recovered to zero while loading
pub fn get_load_diagnostics(store: &InventoryStore) -> Result<LoadDiagnosticsResponse, String> {
    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;
    let tables = &analysis.tables;

    Ok(LoadDiagnosticsResponse {
        sales_rows: tables.sales.len(),
        recipe_rows: tables.recipes.rows.len(),
        shipment_rows: tables.shipments.len(),
        months: analysis.usage.months().into_iter().map(String::from).collect(),
        clean: tables.diagnostics.is_clean(),
        diagnostics: tables.diagnostics.clone(),
        unmatched_categories: analysis.usage.unmatched_categories.clone(),
    })
}

/// Response for reload_inventory
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub message: String,
    pub fingerprint: Option<String>,
}

/// Discard the cached analysis and recompute it
pub fn reload_inventory(store: &InventoryStore) -> Result<ReloadResponse, String> {
    let analysis = store
        .reload()
        .map_err(|e| format!("Failed to reload inventory data: {}", e))?;
    let stats = store
        .cache_stats()
        .map_err(|e| format!("Failed to read cache stats: {}", e))?;

    Ok(ReloadResponse {
        success: true,
        message: format!(
            "Reloaded {} sales rows across {} months and {} shipment rows",
            analysis.tables.sales.len(),
            analysis.usage.monthly.len(),
            analysis.tables.shipments.len()
        ),
        fingerprint: stats.current_fingerprint.map(|f| f.to_string()),
    })
}
