//! Print the supply vs usage table for a data directory
//!
//! Usage: supply_report [DATA_DIR] [--json]

use ism::config::Config;
use ism::data::InventoryStore;
use ism::models::ComparisonRow;
use tracing_subscriber::EnvFilter;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "n/a".to_string(),
    }
}

fn print_table(rows: &[ComparisonRow]) {
    println!(
        "{:<18} {:>6} {:>14} {:>14} {:>14} {:>8} {:>8}  {}",
        "Ingredient", "Unit", "Supply/mo", "Usage/mo", "Difference", "Util %", "Days", "Status"
    );
    for row in rows {
        let status = row.status.map(|s| s.as_str()).unwrap_or("UNKNOWN");
        let flag = if row.issues.is_empty() { "" } else { " *" };
        println!(
            "{:<18} {:>6} {:>14} {:>14.1} {:>14} {:>8} {:>8}  {}{}",
            row.ingredient_name,
            row.unit_label,
            fmt_opt(row.monthly_supply, 1),
            row.average_monthly_usage,
            fmt_opt(row.difference, 1),
            fmt_opt(row.utilization_percent, 1),
            fmt_opt(row.days_of_supply, 1),
            status,
            flag
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ism=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut data_dir = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            data_dir = Some(arg);
        }
    }

    let config = match data_dir {
        Some(dir) => Config::from_data_dir(dir),
        None => Config::from_env(),
    };
    let store = InventoryStore::from_config(config)?;
    let analysis = store.analysis()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.comparison)?);
        return Ok(());
    }

    println!("Months: {}", analysis.usage.months().join(", "));
    print_table(&analysis.comparison);
    if analysis.comparison.iter().any(|r| !r.issues.is_empty()) {
        println!("\n* usage or supply fell back due to a data issue (see get_supply_insights)");
    }
    if !analysis.tables.diagnostics.is_clean() {
        eprintln!(
            "{} malformed values were read as 0",
            analysis.tables.diagnostics.malformed_values.len()
        );
    }

    Ok(())
}
