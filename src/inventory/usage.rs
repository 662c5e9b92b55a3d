//! Ingredient usage from sales
//!
//! Sales rows are left-joined to recipes on category: every sold item contributes
//! `quantity per item × count` to each ingredient in its month. Items without a
//! recipe contribute nothing but stay in the sales accounting.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::data::month::{compare_month_labels, normalize_month_label};
use crate::models::{RecipeTable, SaleRecord};

/// Ingredient totals for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    pub month: String,
    /// Ingredient column -> quantity consumed; every recipe ingredient is present
    pub totals: BTreeMap<String, f64>,
}

impl MonthlyUsage {
    pub fn usage(&self, ingredient: &str) -> f64 {
        self.totals.get(ingredient).copied().unwrap_or(0.0)
    }
}

/// Usage per month plus the all-time monthly average
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageReport {
    /// Ingredient columns in recipe table order
    pub ingredients: Vec<String>,
    /// One entry per observed month, calendar ordered
    pub monthly: Vec<MonthlyUsage>,
    /// Mean over all observed months, absent months counting as zero
    pub average_monthly_usage: BTreeMap<String, f64>,
    /// Sales categories with no recipe row
    pub unmatched_categories: Vec<String>,
}

impl UsageReport {
    pub fn months(&self) -> Vec<&str> {
        self.monthly.iter().map(|m| m.month.as_str()).collect()
    }

    /// Look up a month by label ("may" and "May" are the same month)
    pub fn month(&self, label: &str) -> Option<&MonthlyUsage> {
        let normalized = normalize_month_label(label);
        self.monthly.iter().find(|m| m.month == normalized)
    }

    pub fn usage(&self, month: &str, ingredient: &str) -> f64 {
        self.month(month).map(|m| m.usage(ingredient)).unwrap_or(0.0)
    }

    pub fn average(&self, ingredient: &str) -> Option<f64> {
        self.average_monthly_usage.get(ingredient).copied()
    }

    /// Usage per ingredient summed over every month
    pub fn grand_totals(&self) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> =
            self.ingredients.iter().map(|i| (i.clone(), 0.0)).collect();
        for month in &self.monthly {
            for (ingredient, quantity) in &month.totals {
                *totals.entry(ingredient.clone()).or_insert(0.0) += quantity;
            }
        }
        totals
    }
}

/// Compute per-month ingredient usage and the monthly average
pub fn calculate_usage(sales: &[SaleRecord], recipes: &RecipeTable) -> UsageReport {
    let index = recipes.index();
    let zero_totals: BTreeMap<String, f64> = recipes
        .ingredient_columns
        .iter()
        .map(|c| (c.clone(), 0.0))
        .collect();

    let mut by_month: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut unmatched: BTreeSet<String> = BTreeSet::new();

    for sale in sales {
        let totals = by_month
            .entry(sale.month.clone())
            .or_insert_with(|| zero_totals.clone());

        match index.get(sale.item_category.as_str()) {
            Some(recipe) => {
                for column in &recipes.ingredient_columns {
                    let per_item = recipe.quantity(column);
                    if let Some(total) = totals.get_mut(column) {
                        *total += per_item * sale.count;
                    }
                }
            }
            None => {
                unmatched.insert(sale.item_category.clone());
            }
        }
    }

    let mut monthly: Vec<MonthlyUsage> = by_month
        .into_iter()
        .map(|(month, totals)| MonthlyUsage { month, totals })
        .collect();
    monthly.sort_by(|a, b| compare_month_labels(&a.month, &b.month));

    let average_monthly_usage = average_over_months(&recipes.ingredient_columns, &monthly);

    if !unmatched.is_empty() {
        tracing::debug!(
            "{} sales categories have no recipe: {:?}",
            unmatched.len(),
            unmatched
        );
    }

    UsageReport {
        ingredients: recipes.ingredient_columns.clone(),
        monthly,
        average_monthly_usage,
        unmatched_categories: unmatched.into_iter().collect(),
    }
}

/// Flat mean per ingredient; the divisor is the number of months observed overall
fn average_over_months(ingredients: &[String], monthly: &[MonthlyUsage]) -> BTreeMap<String, f64> {
    let month_count = monthly.len();
    ingredients
        .iter()
        .map(|ingredient| {
            let average = if month_count == 0 {
                0.0
            } else {
                let sum: f64 = monthly.iter().map(|m| m.usage(ingredient)).sum();
                sum / month_count as f64
            };
            (ingredient.clone(), average)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeRow;

    fn flour_recipes() -> RecipeTable {
        RecipeTable::new(
            vec!["Flour".to_string()],
            vec![RecipeRow::new("A").with("Flour", 50.0)],
        )
    }

    #[test]
    fn test_single_month_usage() {
        let sales = vec![SaleRecord::new("A", 10.0, 100.0, "May")];
        let report = calculate_usage(&sales, &flour_recipes());
        assert_eq!(report.usage("May", "Flour"), 500.0);
        assert_eq!(report.average("Flour"), Some(500.0));
    }

    #[test]
    fn test_two_month_average() {
        let sales = vec![
            SaleRecord::new("A", 10.0, 100.0, "May"),
            SaleRecord::new("A", 20.0, 200.0, "June"),
        ];
        let report = calculate_usage(&sales, &flour_recipes());
        assert_eq!(report.usage("May", "Flour"), 500.0);
        assert_eq!(report.usage("June", "Flour"), 1000.0);
        assert_eq!(report.average("Flour"), Some(750.0));
        assert_eq!(report.months(), vec!["May", "June"]);
    }

    #[test]
    fn test_average_divides_by_all_observed_months() {
        let recipes = RecipeTable::new(
            vec!["Flour".to_string(), "Egg(count)".to_string()],
            vec![
                RecipeRow::new("A").with("Flour", 50.0),
                RecipeRow::new("B").with("Egg(count)", 2.0),
            ],
        );
        let sales = vec![
            SaleRecord::new("A", 10.0, 0.0, "May"),
            SaleRecord::new("B", 3.0, 0.0, "June"),
            SaleRecord::new("A", 2.0, 0.0, "July"),
        ];
        let report = calculate_usage(&sales, &recipes);

        // Egg only appears in June but the divisor is still 3
        assert_eq!(report.usage("May", "Egg(count)"), 0.0);
        assert_eq!(report.average("Egg(count)"), Some(2.0));
        assert_eq!(report.average("Flour"), Some((500.0 + 0.0 + 100.0) / 3.0));
    }

    #[test]
    fn test_unmatched_sales_keep_zero_usage() {
        let sales = vec![
            SaleRecord::new("A", 1.0, 10.0, "May"),
            SaleRecord::new("Gift Card", 5.0, 250.0, "May"),
            SaleRecord::new("Soda", 4.0, 8.0, "June"),
        ];
        let report = calculate_usage(&sales, &flour_recipes());

        assert_eq!(report.unmatched_categories, vec!["Gift Card", "Soda"]);
        // June only has unmatched sales but still counts as a month
        assert_eq!(report.months(), vec!["May", "June"]);
        assert_eq!(report.usage("June", "Flour"), 0.0);
        assert_eq!(report.average("Flour"), Some(25.0));
    }

    #[test]
    fn test_join_is_exact_match() {
        let sales = vec![SaleRecord::new("a", 10.0, 100.0, "May")];
        let report = calculate_usage(&sales, &flour_recipes());
        assert_eq!(report.usage("May", "Flour"), 0.0);
        assert_eq!(report.unmatched_categories, vec!["a"]);
    }

    #[test]
    fn test_malformed_count_contributes_zero() {
        // a count of "abc" is loaded as 0
        let sales = vec![
            SaleRecord::new("A", 0.0, 12.0, "May"),
            SaleRecord::new("A", 2.0, 24.0, "May"),
        ];
        let report = calculate_usage(&sales, &flour_recipes());
        assert_eq!(report.usage("May", "Flour"), 100.0);
    }

    #[test]
    fn test_monthly_totals_sum_to_grand_total() {
        let recipes = RecipeTable::new(
            vec!["Flour".to_string(), "Rice(g)".to_string()],
            vec![
                RecipeRow::new("A").with("Flour", 50.0),
                RecipeRow::new("B").with("Flour", 12.5).with("Rice(g)", 200.0),
            ],
        );
        let sales = vec![
            SaleRecord::new("A", 10.0, 0.0, "May"),
            SaleRecord::new("B", 7.0, 0.0, "May"),
            SaleRecord::new("A", 3.0, 0.0, "June"),
            SaleRecord::new("B", 11.0, 0.0, "July"),
            SaleRecord::new("C", 40.0, 0.0, "July"),
        ];
        let report = calculate_usage(&sales, &recipes);
        let totals = report.grand_totals();

        for ingredient in &recipes.ingredient_columns {
            let direct: f64 = sales
                .iter()
                .filter_map(|s| recipes.get(&s.item_category).map(|r| r.quantity(ingredient) * s.count))
                .sum();
            assert!((totals[ingredient] - direct).abs() < 1e-9, "{}", ingredient);
        }
    }

    #[test]
    fn test_months_are_calendar_ordered() {
        let sales = vec![
            SaleRecord::new("A", 1.0, 0.0, "October"),
            SaleRecord::new("A", 1.0, 0.0, "May"),
            SaleRecord::new("A", 1.0, 0.0, "August"),
        ];
        let report = calculate_usage(&sales, &flour_recipes());
        assert_eq!(report.months(), vec!["May", "August", "October"]);
    }

    #[test]
    fn test_month_lookup_is_normalized() {
        let sales = vec![SaleRecord::new("A", 1.0, 0.0, "May")];
        let report = calculate_usage(&sales, &flour_recipes());
        assert!(report.month("may").is_some());
        assert!(report.month("MAY").is_some());
        assert!(report.month("June").is_none());
    }

    #[test]
    fn test_no_sales_gives_zero_averages() {
        let report = calculate_usage(&[], &flour_recipes());
        assert!(report.monthly.is_empty());
        assert_eq!(report.average("Flour"), Some(0.0));
    }
}
