//! Usage MCP Tools
//!
//! Per-month ingredient usage and the views built on it.

use serde::Serialize;

use crate::data::InventoryStore;
use crate::inventory::insights::{IngredientUsage, UsageTrend};
use crate::inventory::{top_ingredients, usage_trend, MonthlyUsage, Ranking};

const MAX_RESULTS: usize = 100;

/// Response for get_monthly_usage
#[derive(Debug, Serialize)]
pub struct MonthlyUsageResponse {
    pub months: Vec<MonthlyUsage>,
    pub average_monthly_usage: Vec<IngredientUsage>,
    pub unmatched_categories: Vec<String>,
}

/// Get usage per month, optionally restricted to one month
pub fn get_monthly_usage(
    store: &InventoryStore,
    month: Option<&str>,
) -> Result<MonthlyUsageResponse, String> {
    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;
    let report = &analysis.usage;

    let months = match month {
        Some(label) => match report.month(label) {
            Some(m) => vec![m.clone()],
            None => {
                return Err(format!(
                    "No sales for month '{}'. Available: {}",
                    label,
                    report.months().join(", ")
                ))
            }
        },
        None => report.monthly.clone(),
    };

    let average_monthly_usage = report
        .ingredients
        .iter()
        .map(|ingredient| IngredientUsage {
            ingredient: ingredient.clone(),
            quantity: report.average(ingredient).unwrap_or(0.0),
        })
        .collect();

    Ok(MonthlyUsageResponse {
        months,
        average_monthly_usage,
        unmatched_categories: report.unmatched_categories.clone(),
    })
}

/// Response for get_top_ingredients
#[derive(Debug, Serialize)]
pub struct TopIngredientsResponse {
    pub month: String,
    pub ranking: String,
    pub ingredients: Vec<IngredientUsage>,
}

/// Get the most or least used ingredients in a month
pub fn get_top_ingredients(
    store: &InventoryStore,
    month: &str,
    ranking: &str,
    limit: usize,
) -> Result<TopIngredientsResponse, String> {
    let order = Ranking::from_str(ranking)
        .ok_or_else(|| format!("Invalid ranking '{}'. Use 'most' or 'least'", ranking))?;

    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;

    let ingredients = top_ingredients(&analysis.usage, month, limit.min(MAX_RESULTS), order)
        .ok_or_else(|| {
            format!(
                "No sales for month '{}'. Available: {}",
                month,
                analysis.usage.months().join(", ")
            )
        })?;

    Ok(TopIngredientsResponse {
        month: month.to_string(),
        ranking: ranking.to_lowercase(),
        ingredients,
    })
}

/// Response for get_usage_trend
#[derive(Debug, Serialize)]
pub struct UsageTrendResponse {
    pub months: Vec<String>,
    pub trends: Vec<UsageTrend>,
}

/// Get the month-by-month series of the most used ingredients
pub fn get_usage_trend(store: &InventoryStore, top: usize) -> Result<UsageTrendResponse, String> {
    let analysis = store
        .analysis()
        .map_err(|e| format!("Failed to load inventory data: {}", e))?;

    Ok(UsageTrendResponse {
        months: analysis.usage.months().into_iter().map(String::from).collect(),
        trends: usage_trend(&analysis.usage, top.min(MAX_RESULTS)),
    })
}
