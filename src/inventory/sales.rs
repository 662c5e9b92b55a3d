//! Sales summaries
//!
//! Revenue and item counts over the loaded sales rows, independent of recipes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::month::compare_month_labels;
use crate::models::SaleRecord;

/// Totals for one menu item across all months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSales {
    pub item_category: String,
    pub count: f64,
    pub amount: f64,
}

/// Totals for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    pub month: String,
    pub revenue: f64,
    pub items_sold: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    /// Items with non-zero revenue, highest revenue first
    pub items: Vec<ItemSales>,
    pub total_revenue: f64,
    pub total_items_sold: f64,
    /// None when nothing was sold
    pub average_item_price: Option<f64>,
    pub by_month: Vec<MonthlySales>,
}

impl SalesSummary {
    pub fn top_by_revenue(&self, n: usize) -> Vec<&ItemSales> {
        self.items.iter().take(n).collect()
    }

    pub fn top_by_count(&self, n: usize) -> Vec<&ItemSales> {
        let mut items: Vec<&ItemSales> = self.items.iter().collect();
        items.sort_by(|a, b| {
            b.count
                .total_cmp(&a.count)
                .then_with(|| a.item_category.cmp(&b.item_category))
        });
        items.truncate(n);
        items
    }
}

pub fn summarize_sales(sales: &[SaleRecord]) -> SalesSummary {
    let mut by_item: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    let mut by_month: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    let mut total_revenue = 0.0;
    let mut total_items_sold = 0.0;

    for sale in sales {
        let item = by_item.entry(sale.item_category.as_str()).or_insert((0.0, 0.0));
        item.0 += sale.count;
        item.1 += sale.amount;

        let month = by_month.entry(sale.month.as_str()).or_insert((0.0, 0.0));
        month.0 += sale.count;
        month.1 += sale.amount;

        total_revenue += sale.amount;
        total_items_sold += sale.count;
    }

    let mut items: Vec<ItemSales> = by_item
        .into_iter()
        .filter(|(_, (_, amount))| *amount != 0.0)
        .map(|(name, (count, amount))| ItemSales {
            item_category: name.to_string(),
            count,
            amount,
        })
        .collect();
    items.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.item_category.cmp(&b.item_category))
    });

    let mut by_month: Vec<MonthlySales> = by_month
        .into_iter()
        .map(|(month, (items_sold, revenue))| MonthlySales {
            month: month.to_string(),
            revenue,
            items_sold,
        })
        .collect();
    by_month.sort_by(|a, b| compare_month_labels(&a.month, &b.month));

    let average_item_price = if total_items_sold > 0.0 {
        Some(total_revenue / total_items_sold)
    } else {
        None
    };

    SalesSummary {
        items,
        total_revenue,
        total_items_sold,
        average_item_price,
        by_month,
    }
}
