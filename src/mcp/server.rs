//! ISM MCP Server Implementation
//!
//! Implements the MCP server with all ISM tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::data::InventoryStore;
use crate::tools::sales;
use crate::tools::status::StatusTracker;
use crate::tools::supply;
use crate::tools::usage;

/// ISM MCP Service
#[derive(Clone)]
pub struct IsmService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    store: InventoryStore,
    tool_router: ToolRouter<IsmService>,
}

impl IsmService {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            store,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Usage Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMonthlyUsageParams {
    /// Month name, e.g. "May" (optional, all months if omitted)
    pub month: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetTopIngredientsParams {
    /// Month name, e.g. "June"
    pub month: String,
    /// "most" or "least" (default most; least skips unused ingredients)
    #[serde(default = "default_ranking")]
    pub ranking: String,
    /// Number of ingredients to return (default 5)
    #[serde(default = "default_top")]
    pub limit: usize,
}

fn default_ranking() -> String { "most".to_string() }
fn default_top() -> usize { 5 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetUsageTrendParams {
    /// Number of ingredients to include, ranked by total usage (default 5)
    #[serde(default = "default_top")]
    pub top: usize,
}

// ============================================================================
// Supply Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSupplyComparisonParams {
    /// Sort by: days_of_supply, difference, or utilization (optional, shipment order if omitted)
    pub sort_by: Option<String>,
    /// Only rows with this status: CRITICAL, LOW, GOOD, or OVERSTOCKED (optional)
    pub status: Option<String>,
}

// ============================================================================
// Sales Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetSalesSummaryParams {
    /// Number of best sellers to list (default 10)
    #[serde(default = "default_sales_top")]
    pub top: usize,
}

fn default_sales_top() -> usize { 10 }

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl IsmService {
    // --- Status ---

    #[tool(description = "Get the current status of the ISM service including build info, data directory, cache statistics, and process information")]
    async fn ism_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.store);
        to_json(&status)
    }

    #[tool(description = "Get instructions for analyzing ingredient usage and supply. Call this when starting an inventory session or when unsure how to read the supply tables.")]
    fn inventory_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::INVENTORY_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(INVENTORY_INSTRUCTIONS)]))
    }

    // --- Usage ---

    #[tool(description = "Get ingredient usage per month (quantity per item × items sold) and the average monthly usage across all months")]
    fn get_monthly_usage(&self, Parameters(p): Parameters<GetMonthlyUsageParams>) -> Result<CallToolResult, McpError> {
        let result = usage::get_monthly_usage(&self.store, p.month.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get the most or least used ingredients for a month")]
    fn get_top_ingredients(&self, Parameters(p): Parameters<GetTopIngredientsParams>) -> Result<CallToolResult, McpError> {
        let result = usage::get_top_ingredients(&self.store, &p.month, &p.ranking, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get month-by-month usage for the most used ingredients")]
    fn get_usage_trend(&self, Parameters(p): Parameters<GetUsageTrendParams>) -> Result<CallToolResult, McpError> {
        let result = usage::get_usage_trend(&self.store, p.top)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Supply ---

    #[tool(description = "Compare monthly shipment supply against average monthly usage: difference, utilization %, days of supply, and status (CRITICAL < 5 days, LOW < 10, GOOD < 45, OVERSTOCKED otherwise)")]
    fn get_supply_comparison(&self, Parameters(p): Parameters<GetSupplyComparisonParams>) -> Result<CallToolResult, McpError> {
        let result = supply::get_supply_comparison(&self.store, p.sort_by.as_deref(), p.status.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get supply status counts, critical/low/overstocked ingredient lists, average utilization, and rows with data issues")]
    fn get_supply_insights(&self) -> Result<CallToolResult, McpError> {
        let result = supply::get_supply_insights(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Sales & Data ---

    #[tool(description = "Get total revenue, items sold, average item price, best sellers by revenue and count, and revenue per month")]
    fn get_sales_summary(&self, Parameters(p): Parameters<GetSalesSummaryParams>) -> Result<CallToolResult, McpError> {
        let result = sales::get_sales_summary(&self.store, p.top)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get row counts and every malformed value that was read as 0 while loading the input tables")]
    fn get_load_diagnostics(&self) -> Result<CallToolResult, McpError> {
        let result = sales::get_load_diagnostics(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Discard cached results and recompute from the input files")]
    fn reload_inventory(&self) -> Result<CallToolResult, McpError> {
        let result = sales::reload_inventory(&self.store)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for IsmService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ism".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Ingredient Supply Monitor".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Ingredient Supply Monitor (ISM) - Ingredient usage from sales and supply vs usage. \
                 IMPORTANT: Call inventory_instructions first. \
                 Usage: get_monthly_usage, get_top_ingredients, get_usage_trend. \
                 Supply: get_supply_comparison (sort_by, status filter), get_supply_insights. \
                 Sales: get_sales_summary. \
                 Data: get_load_diagnostics, reload_inventory, ism_status."
                    .into(),
            ),
        }
    }
}
