//! ISM Status Tool
//!
//! Provides runtime status information about the ISM service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::data::{CacheStats, InventoryStore};

/// Inventory analysis instructions for AI assistants
pub const INVENTORY_INSTRUCTIONS: &str = r#"
# ISM Inventory Analysis Instructions

This guide explains how to answer supply questions with the Ingredient Supply Monitor (ISM) tools.

## Overview

ISM reads three tables from its data directory:
1. **Monthly sales** - One CSV per month in `csv_files/` (Item Name, Count, Amount)
2. **Recipes** - `Ingredient.csv`, one row per menu item, one column per ingredient (quantity per item)
3. **Shipments** - `Shipment.csv` (Ingredient, Quantity per shipment, Unit of shipment, Number of shipments, frequency)

Results are cached and recomputed automatically when any file changes.

---

## Usage

- `get_monthly_usage` - Ingredient totals per month plus the average across all months
- `get_top_ingredients` - Most or least used ingredients in a month (`ranking`: most | least)
- `get_usage_trend` - Month-by-month series of the most used ingredients

Usage = quantity per item × items sold. Sales items without a recipe are listed as
`unmatched_categories` and contribute no usage.

---

## Supply

- `get_supply_comparison` - One row per shipment: monthly supply, average usage, difference,
  utilization %, days of supply and status
- `get_supply_insights` - Counts per status, critical/low/overstocked lists, data issues

**Normalization:**
- weekly = 4 shipments/month, biweekly = 2, monthly = 1
- lbs are converted to grams (453.59237 g/lb); other units are used as-is

**Status by days of supply:**
| Days | Status |
|------|--------|
| < 5 | CRITICAL |
| 5 to < 10 | LOW |
| 10 to < 45 | GOOD |
| ≥ 45 | OVERSTOCKED |

Days of supply is 999 when usage is 0.

**Data issues** on a row mean a fallback was applied:
- `unmapped_ingredient` - no usage mapping for the shipment name, usage taken as 0
- `missing_usage_column` - mapped column absent from the recipe table, usage taken as 0
- `unrecognized_frequency` - supply, difference, utilization and days are null

---

## Sales & Data Quality

- `get_sales_summary` - Revenue, items sold, average price, best sellers
- `get_load_diagnostics` - Row counts and every malformed value that was read as 0
- `reload_inventory` - Force a recompute after replacing files

---

## Tips

- Always check `get_load_diagnostics` when numbers look wrong
- Never treat a null status as GOOD; it means supply could not be computed
"#;

/// Runtime status of the ISM service
#[derive(Debug, Clone, Serialize)]
pub struct IsmStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Input information
    pub data_dir: String,
    pub sales_dir: String,
    pub name_map_entries: usize,
    pub cache: Option<CacheStats>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, store: &InventoryStore) -> IsmStatus {
        let build_info = BuildInfo::current();
        let config = store.config();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        IsmStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            data_dir: config.data_dir.display().to_string(),
            sales_dir: config.sales_dir.display().to_string(),
            name_map_entries: store.name_map().len(),
            cache: store.cache_stats().ok(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
