//! File-based pipeline tests: discovery, loading, analysis and caching

use std::fs;
use std::path::Path;

use ism::config::Config;
use ism::data::{InventoryStore, LoadError, SourceKind};
use ism::inventory::IngredientNameMap;
use ism::models::{DataIssue, SupplyStatus};
use ism::tools::{sales, supply, usage};

const RECIPES: &str = "\
Item name,flour (g),Egg(count),Boychoy(g)
Dumplings,50,,10
Egg Tart,20,1,
";

const SHIPMENTS: &str = "\
Ingredient,Quantity per shipment,Unit of shipment,Number of shipments,frequency
Flour,1,lbs,1,monthly
Egg,100,count,1,weekly
Bokchoy,500,g,1,biweekly
Tofu,10,lbs,1,weekly
Egg,50,count,1,every other day
";

fn write_inputs(dir: &Path) {
    let sales_dir = dir.join("csv_files");
    fs::create_dir_all(&sales_dir).unwrap();
    fs::write(
        sales_dir.join("MSY Data -May.csv"),
        "Item Name,Count,Amount\nDumplings,10,100\nEgg Tart,5,\"1,000\"\nSoda,3,6\n",
    )
    .unwrap();
    fs::write(
        sales_dir.join("MSY Data -June.csv"),
        "Item Name,Count,Amount\nDumplings,20,200\nEgg Tart,abc,0\n",
    )
    .unwrap();
    fs::write(dir.join("Ingredient.csv"), RECIPES).unwrap();
    fs::write(dir.join("Shipment.csv"), SHIPMENTS).unwrap();
}

fn store_for(dir: &Path) -> InventoryStore {
    InventoryStore::new(Config::from_data_dir(dir), IngredientNameMap::default())
}

#[test]
fn test_may_june_flour_scenario() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let store = store_for(dir.path());

    let analysis = store.analysis().unwrap();
    assert_eq!(analysis.usage.months(), vec!["May", "June"]);
    assert_eq!(analysis.usage.usage("May", "flour (g)"), 500.0 + 100.0);
    assert_eq!(analysis.usage.usage("June", "flour (g)"), 1000.0);
    assert_eq!(analysis.usage.average("flour (g)"), Some(800.0));

    // malformed count in June is kept as a zero-count row
    assert_eq!(analysis.tables.sales.len(), 5);
    assert_eq!(analysis.tables.diagnostics.malformed_values.len(), 1);
    assert_eq!(analysis.usage.usage("June", "Egg(count)"), 0.0);

    // recipe column variant is remapped
    assert_eq!(analysis.usage.usage("May", "Bokchoy(g)"), 100.0);
    assert_eq!(analysis.usage.unmatched_categories, vec!["Soda"]);
}

#[test]
fn test_supply_comparison_rows() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let store = store_for(dir.path());
    let analysis = store.analysis().unwrap();
    let rows = &analysis.comparison;
    assert_eq!(rows.len(), 5);

    let flour = &rows[0];
    assert_eq!(flour.monthly_supply, Some(453.59237));
    assert_eq!(flour.difference, Some(453.59237 - 800.0));
    assert!(flour.utilization_percent.unwrap() > 100.0);
    assert_eq!(flour.status, Some(SupplyStatus::Good));

    let egg = &rows[1];
    assert_eq!(egg.monthly_supply, Some(400.0));
    assert_eq!(egg.average_monthly_usage, 2.5);
    assert_eq!(egg.days_of_supply, Some(400.0 / (2.5 / 30.0)));
    assert_eq!(egg.status, Some(SupplyStatus::Overstocked));

    let bokchoy = &rows[2];
    assert_eq!(bokchoy.monthly_supply, Some(1000.0));
    assert_eq!(bokchoy.average_monthly_usage, 150.0);
    assert_eq!(bokchoy.status, Some(SupplyStatus::Overstocked));

    let tofu = &rows[3];
    assert_eq!(tofu.issues, vec![DataIssue::UnmappedIngredient]);
    assert_eq!(tofu.days_of_supply, Some(999.0));

    let irregular_egg = &rows[4];
    assert_eq!(irregular_egg.monthly_supply, None);
    assert_eq!(irregular_egg.difference, None);
    assert_eq!(irregular_egg.days_of_supply, None);
    assert_eq!(irregular_egg.status, None);
    assert_eq!(
        irregular_egg.issues,
        vec![DataIssue::UnrecognizedFrequency {
            value: "every other day".to_string()
        }]
    );
}

#[test]
fn test_cache_hits_until_inputs_change() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let store = store_for(dir.path());

    let first = store.analysis().unwrap();
    let second = store.analysis().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    let stats = store.cache_stats().unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    fs::write(
        dir.path().join("csv_files").join("MSY Data -June.csv"),
        "Item Name,Count,Amount\nDumplings,40,400\n",
    )
    .unwrap();
    let third = store.analysis().unwrap();
    assert_eq!(third.usage.usage("June", "flour (g)"), 2000.0);
    assert_eq!(store.cache_stats().unwrap().misses, 2);
}

#[test]
fn test_reload_recomputes() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let store = store_for(dir.path());

    store.analysis().unwrap();
    let response = sales::reload_inventory(&store).unwrap();
    assert!(response.success);
    assert!(response.fingerprint.is_some());

    let stats = store.cache_stats().unwrap();
    assert_eq!(stats.invalidations, 1);
    assert_eq!(stats.misses, 2);
}

#[test]
fn test_missing_shipment_file() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    fs::remove_file(dir.path().join("Shipment.csv")).unwrap();

    match store_for(dir.path()).analysis() {
        Err(LoadError::MissingInput { kind, path }) => {
            assert_eq!(kind, SourceKind::Shipments);
            assert!(path.ends_with("Shipment.csv"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected a missing input error"),
    }
}

#[test]
fn test_empty_sales_directory_is_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    for entry in fs::read_dir(dir.path().join("csv_files")).unwrap() {
        fs::remove_file(entry.unwrap().path()).unwrap();
    }

    assert!(matches!(
        store_for(dir.path()).analysis(),
        Err(LoadError::MissingInput {
            kind: SourceKind::Sales,
            ..
        })
    ));
}

#[test]
fn test_tool_responses() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let store = store_for(dir.path());

    let good = supply::get_supply_comparison(&store, Some("days"), Some("good")).unwrap();
    assert_eq!(good.total, 1);
    assert_eq!(good.rows[0].ingredient_name, "Flour");
    assert!(supply::get_supply_comparison(&store, Some("name"), None).is_err());

    let insights = supply::get_supply_insights(&store).unwrap();
    assert_eq!(insights.counts.undetermined, 1);
    assert_eq!(insights.data_issues.len(), 2);

    let top = usage::get_top_ingredients(&store, "may", "most", 1).unwrap();
    assert_eq!(top.ingredients[0].ingredient, "flour (g)");
    assert!(usage::get_monthly_usage(&store, Some("December")).is_err());

    let summary = sales::get_sales_summary(&store, 2).unwrap();
    assert_eq!(summary.total_revenue, 1306.0);
    assert_eq!(summary.top_by_revenue[0].item_category, "Egg Tart");

    let diagnostics = sales::get_load_diagnostics(&store).unwrap();
    assert!(!diagnostics.clean);
    assert_eq!(diagnostics.months, vec!["May", "June"]);
}
