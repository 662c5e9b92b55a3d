//! Derived views over usage and comparison tables

use serde::Serialize;

use super::usage::UsageReport;
use crate::models::{ComparisonRow, DataIssue, SupplyStatus};

// ============================================================================
// Supply Insights
// ============================================================================

/// Number of comparison rows per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub critical: usize,
    pub low: usize,
    pub good: usize,
    pub overstocked: usize,
    /// Rows whose status could not be determined
    pub undetermined: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAlert {
    pub ingredient_name: String,
    pub days_of_supply: Option<f64>,
    pub utilization_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientIssues {
    pub ingredient_name: String,
    pub issues: Vec<DataIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupplyInsights {
    pub counts: StatusCounts,
    pub critical: Vec<ItemAlert>,
    pub low: Vec<ItemAlert>,
    pub overstocked: Vec<ItemAlert>,
    /// Mean over rows with a defined utilization; None if there are none
    pub average_utilization_percent: Option<f64>,
    pub data_issues: Vec<IngredientIssues>,
}

fn alerts_for(rows: &[ComparisonRow], status: SupplyStatus) -> Vec<ItemAlert> {
    let mut alerts: Vec<ItemAlert> = rows
        .iter()
        .filter(|r| r.status == Some(status))
        .map(|r| ItemAlert {
            ingredient_name: r.ingredient_name.clone(),
            days_of_supply: r.days_of_supply,
            utilization_percent: r.utilization_percent,
        })
        .collect();
    alerts.sort_by(|a, b| {
        let a_days = a.days_of_supply.unwrap_or(f64::INFINITY);
        let b_days = b.days_of_supply.unwrap_or(f64::INFINITY);
        a_days
            .total_cmp(&b_days)
            .then_with(|| a.ingredient_name.cmp(&b.ingredient_name))
    });
    alerts
}

pub fn supply_insights(rows: &[ComparisonRow]) -> SupplyInsights {
    let mut counts = StatusCounts::default();
    for row in rows {
        match row.status {
            Some(SupplyStatus::Critical) => counts.critical += 1,
            Some(SupplyStatus::Low) => counts.low += 1,
            Some(SupplyStatus::Good) => counts.good += 1,
            Some(SupplyStatus::Overstocked) => counts.overstocked += 1,
            None => counts.undetermined += 1,
        }
    }

    let utilizations: Vec<f64> = rows.iter().filter_map(|r| r.utilization_percent).collect();
    let average_utilization_percent = if utilizations.is_empty() {
        None
    } else {
        Some(utilizations.iter().sum::<f64>() / utilizations.len() as f64)
    };

    let data_issues = rows
        .iter()
        .filter(|r| !r.issues.is_empty())
        .map(|r| IngredientIssues {
            ingredient_name: r.ingredient_name.clone(),
            issues: r.issues.clone(),
        })
        .collect();

    SupplyInsights {
        counts,
        critical: alerts_for(rows, SupplyStatus::Critical),
        low: alerts_for(rows, SupplyStatus::Low),
        overstocked: alerts_for(rows, SupplyStatus::Overstocked),
        average_utilization_percent,
        data_issues,
    }
}

// ============================================================================
// Usage Views
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Highest usage first
    Most,
    /// Lowest non-zero usage first
    Least,
}

impl Ranking {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "most" | "top" => Some(Ranking::Most),
            "least" | "bottom" => Some(Ranking::Least),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientUsage {
    pub ingredient: String,
    pub quantity: f64,
}

/// Ingredients ranked by usage in one month; None if the month was never observed
pub fn top_ingredients(
    report: &UsageReport,
    month: &str,
    n: usize,
    ranking: Ranking,
) -> Option<Vec<IngredientUsage>> {
    let monthly = report.month(month)?;

    let mut ranked: Vec<IngredientUsage> = report
        .ingredients
        .iter()
        .map(|ingredient| IngredientUsage {
            ingredient: ingredient.clone(),
            quantity: monthly.usage(ingredient),
        })
        .filter(|u| ranking == Ranking::Most || u.quantity > 0.0)
        .collect();

    ranked.sort_by(|a, b| {
        let by_quantity = match ranking {
            Ranking::Most => b.quantity.total_cmp(&a.quantity),
            Ranking::Least => a.quantity.total_cmp(&b.quantity),
        };
        by_quantity.then_with(|| a.ingredient.cmp(&b.ingredient))
    });
    ranked.truncate(n);
    Some(ranked)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    pub month: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageTrend {
    pub ingredient: String,
    pub total: f64,
    pub series: Vec<MonthPoint>,
}

/// The `k` most used ingredients overall with their month-by-month usage
pub fn usage_trend(report: &UsageReport, k: usize) -> Vec<UsageTrend> {
    let totals = report.grand_totals();

    let mut ranked: Vec<(&String, f64)> = report
        .ingredients
        .iter()
        .map(|i| (i, totals.get(i).copied().unwrap_or(0.0)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(k);

    ranked
        .into_iter()
        .map(|(ingredient, total)| UsageTrend {
            ingredient: ingredient.clone(),
            total,
            series: report
                .monthly
                .iter()
                .map(|m| MonthPoint {
                    month: m.month.clone(),
                    quantity: m.usage(ingredient),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::usage::calculate_usage;
    use crate::models::{RecipeRow, RecipeTable, SaleRecord};

    fn row(name: &str, days: Option<f64>, utilization: Option<f64>, status: Option<SupplyStatus>) -> ComparisonRow {
        ComparisonRow {
            ingredient_name: name.to_string(),
            unit_label: "g".to_string(),
            monthly_supply: Some(100.0),
            average_monthly_usage: 10.0,
            difference: Some(90.0),
            utilization_percent: utilization,
            days_of_supply: days,
            status,
            issues: Vec::new(),
        }
    }

    fn report() -> UsageReport {
        let recipes = RecipeTable::new(
            vec!["Flour".to_string(), "Rice(g)".to_string(), "Egg(count)".to_string()],
            vec![
                RecipeRow::new("Dumplings").with("Flour", 50.0).with("Egg(count)", 1.0),
                RecipeRow::new("Fried Rice").with("Rice(g)", 200.0),
            ],
        );
        let sales = vec![
            SaleRecord::new("Dumplings", 10.0, 0.0, "May"),
            SaleRecord::new("Fried Rice", 1.0, 0.0, "May"),
            SaleRecord::new("Fried Rice", 5.0, 0.0, "June"),
        ];
        calculate_usage(&sales, &recipes)
    }

    #[test]
    fn test_status_counts_and_alerts() {
        let rows = vec![
            row("Beef", Some(3.0), Some(900.0), Some(SupplyStatus::Critical)),
            row("Egg", Some(1.5), Some(2000.0), Some(SupplyStatus::Critical)),
            row("Rice", Some(7.0), Some(400.0), Some(SupplyStatus::Low)),
            row("Flour", Some(999.0), Some(0.0), Some(SupplyStatus::Overstocked)),
            row("Peas", None, None, None),
        ];
        let insights = supply_insights(&rows);

        assert_eq!(insights.counts.critical, 2);
        assert_eq!(insights.counts.low, 1);
        assert_eq!(insights.counts.good, 0);
        assert_eq!(insights.counts.overstocked, 1);
        assert_eq!(insights.counts.undetermined, 1);
        assert_eq!(insights.critical[0].ingredient_name, "Egg");
        assert_eq!(insights.low.len(), 1);
    }

    #[test]
    fn test_average_utilization_skips_undefined() {
        let rows = vec![
            row("Beef", Some(3.0), Some(90.0), Some(SupplyStatus::Critical)),
            row("Flour", Some(999.0), Some(0.0), Some(SupplyStatus::Overstocked)),
            row("Peas", None, None, None),
        ];
        let insights = supply_insights(&rows);
        assert_eq!(insights.average_utilization_percent, Some(45.0));
        assert_eq!(supply_insights(&[]).average_utilization_percent, None);
    }

    #[test]
    fn test_data_issues_listed() {
        let mut tofu = row("Tofu", Some(999.0), Some(0.0), Some(SupplyStatus::Overstocked));
        tofu.issues.push(DataIssue::UnmappedIngredient);
        let insights = supply_insights(&[tofu, row("Rice", Some(20.0), Some(50.0), Some(SupplyStatus::Good))]);
        assert_eq!(insights.data_issues.len(), 1);
        assert_eq!(insights.data_issues[0].ingredient_name, "Tofu");
    }

    #[test]
    fn test_top_ingredients_most() {
        let top = top_ingredients(&report(), "May", 2, Ranking::Most).unwrap();
        assert_eq!(top[0].ingredient, "Flour");
        assert_eq!(top[0].quantity, 500.0);
        assert_eq!(top[1].ingredient, "Rice(g)");
    }

    #[test]
    fn test_top_ingredients_least_excludes_zero() {
        let bottom = top_ingredients(&report(), "june", 5, Ranking::Least).unwrap();
        assert_eq!(bottom.len(), 1);
        assert_eq!(bottom[0].ingredient, "Rice(g)");
    }

    #[test]
    fn test_top_ingredients_unknown_month() {
        assert!(top_ingredients(&report(), "December", 5, Ranking::Most).is_none());
    }

    #[test]
    fn test_usage_trend() {
        let trend = usage_trend(&report(), 2);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].ingredient, "Rice(g)");
        assert_eq!(trend[0].total, 1200.0);
        let series: Vec<f64> = trend[0].series.iter().map(|p| p.quantity).collect();
        assert_eq!(series, vec![200.0, 1000.0]);
        assert_eq!(trend[1].ingredient, "Flour");
    }

    #[test]
    fn test_ranking_from_str() {
        assert_eq!(Ranking::from_str("bottom"), Some(Ranking::Least));
        assert_eq!(Ranking::from_str("Most"), Some(Ranking::Most));
        assert_eq!(Ranking::from_str("middle"), None);
    }
}
