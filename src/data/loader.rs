//! CSV table loader
//!
//! Parses the three input tables into normalized models. Expected columns (header
//! names match case-insensitively after trimming):
//!   sales:     Item Name | Category, Count, Amount (other columns ignored)
//!   recipes:   Item name | Category, then one column per ingredient
//!   shipments: Ingredient, Quantity per shipment, Unit of shipment, frequency,
//!              Number of shipments

use std::io::Read;

use csv::StringRecord;
use serde::Serialize;

use super::coerce::LoadDiagnostics;
use super::error::{LoadError, LoadResult};
use crate::inventory::names::canonical_column;
use crate::models::{
    RecipeRow, RecipeTable, SaleRecord, ShipmentFrequency, ShipmentSchedule, ShipmentUnit,
};

const SALES_ITEM_COLUMNS: &[&str] = &["Item Name", "Category"];
const RECIPE_ITEM_COLUMNS: &[&str] = &["Item name", "Category"];
const COUNT_COLUMN: &str = "Count";
const AMOUNT_COLUMN: &str = "Amount";
const INGREDIENT_COLUMN: &str = "Ingredient";
const QUANTITY_COLUMN: &str = "Quantity per shipment";
const UNIT_COLUMN: &str = "Unit of shipment";
const FREQUENCY_COLUMN: &str = "frequency";
const SHIPMENT_COUNT_COLUMN: &str = "Number of shipments";

/// All three normalized input tables from one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedTables {
    pub sales: Vec<SaleRecord>,
    pub recipes: RecipeTable,
    pub shipments: Vec<ShipmentSchedule>,
    pub diagnostics: LoadDiagnostics,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn headers<R: Read>(reader: &mut csv::Reader<R>, origin: &str) -> LoadResult<StringRecord> {
    reader.headers().cloned().map_err(|e| LoadError::Csv {
        origin: origin.to_string(),
        error: e,
    })
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        names.iter().any(|n| h.eq_ignore_ascii_case(n))
    })
}

fn require_column(headers: &StringRecord, names: &[&str], origin: &str) -> LoadResult<usize> {
    find_column(headers, names).ok_or_else(|| LoadError::MissingColumn {
        origin: origin.to_string(),
        column: names.join(" | "),
    })
}

fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

/// Iterate data records with their 1-based source line (header is line 1)
fn records<'a, R: Read + 'a>(
    reader: &'a mut csv::Reader<R>,
    origin: &str,
) -> impl Iterator<Item = LoadResult<(usize, StringRecord)>> + 'a {
    let origin = origin.to_string();
    reader.records().enumerate().map(move |(i, result)| {
        result
            .map(|record| (i + 2, record))
            .map_err(|e| LoadError::Csv {
                origin: origin.clone(),
                error: e,
            })
    })
}

/// Load one month of sales records
pub fn load_sales<R: Read>(
    reader: R,
    month: &str,
    origin: &str,
    diagnostics: &mut LoadDiagnostics,
) -> LoadResult<Vec<SaleRecord>> {
    let mut csv_reader = csv_reader(reader);
    let headers = headers(&mut csv_reader, origin)?;

    let item_col = require_column(&headers, SALES_ITEM_COLUMNS, origin)?;
    let count_col = require_column(&headers, &[COUNT_COLUMN], origin)?;
    let amount_col = require_column(&headers, &[AMOUNT_COLUMN], origin)?;

    let mut sales = Vec::new();
    for result in records(&mut csv_reader, origin) {
        let (line, record) = result?;
        if is_blank(&record) {
            continue;
        }

        let count = diagnostics.coerce(cell(&record, count_col), origin, line, COUNT_COLUMN);
        let amount = diagnostics.coerce(cell(&record, amount_col), origin, line, AMOUNT_COLUMN);
        sales.push(SaleRecord::new(cell(&record, item_col), count, amount, month));
    }

    tracing::debug!("Loaded {} sales rows for {} from {}", sales.len(), month, origin);
    Ok(sales)
}

/// Load the recipe table, remapping historical column spellings
pub fn load_recipes<R: Read>(
    reader: R,
    origin: &str,
    diagnostics: &mut LoadDiagnostics,
) -> LoadResult<RecipeTable> {
    let mut csv_reader = csv_reader(reader);
    let headers = headers(&mut csv_reader, origin)?;

    let item_col = require_column(&headers, RECIPE_ITEM_COLUMNS, origin)?;

    // (column index, canonical ingredient name)
    let mut ingredient_cols: Vec<(usize, String)> = Vec::new();
    for (index, header) in headers.iter().enumerate() {
        if index == item_col || header.trim().is_empty() {
            continue;
        }
        let canonical = canonical_column(header).to_string();
        if ingredient_cols.iter().any(|(_, name)| *name == canonical) {
            tracing::warn!(
                "Duplicate ingredient column '{}' in {}, keeping the first",
                canonical,
                origin
            );
            continue;
        }
        ingredient_cols.push((index, canonical));
    }

    let mut rows: Vec<RecipeRow> = Vec::new();
    for result in records(&mut csv_reader, origin) {
        let (line, record) = result?;
        if is_blank(&record) {
            continue;
        }

        let category = cell(&record, item_col);
        if rows.iter().any(|r| r.item_category == category) {
            tracing::warn!(
                "Duplicate recipe for '{}' in {} line {}, keeping the first",
                category,
                origin,
                line
            );
            continue;
        }

        let mut row = RecipeRow::new(category);
        for (index, name) in &ingredient_cols {
            let quantity = diagnostics.coerce(cell(&record, *index), origin, line, name);
            row.quantities.insert(name.clone(), quantity);
        }
        rows.push(row);
    }

    let columns = ingredient_cols.into_iter().map(|(_, name)| name).collect();
    let table = RecipeTable::new(columns, rows);
    tracing::debug!(
        "Loaded {} recipes with {} ingredient columns from {}",
        table.rows.len(),
        table.ingredient_columns.len(),
        origin
    );
    Ok(table)
}

/// Load the shipment schedule table
///
/// Numeric fields are coerced before any arithmetic happens downstream.
pub fn load_shipments<R: Read>(
    reader: R,
    origin: &str,
    diagnostics: &mut LoadDiagnostics,
) -> LoadResult<Vec<ShipmentSchedule>> {
    let mut csv_reader = csv_reader(reader);
    let headers = headers(&mut csv_reader, origin)?;

    let ingredient_col = require_column(&headers, &[INGREDIENT_COLUMN], origin)?;
    let quantity_col = require_column(&headers, &[QUANTITY_COLUMN], origin)?;
    let unit_col = require_column(&headers, &[UNIT_COLUMN], origin)?;
    let frequency_col = require_column(&headers, &[FREQUENCY_COLUMN], origin)?;
    let count_col = require_column(&headers, &[SHIPMENT_COUNT_COLUMN], origin)?;

    let mut shipments = Vec::new();
    for result in records(&mut csv_reader, origin) {
        let (line, record) = result?;
        if is_blank(&record) {
            continue;
        }

        shipments.push(ShipmentSchedule {
            ingredient_name: cell(&record, ingredient_col).to_string(),
            quantity_per_shipment: diagnostics.coerce(
                cell(&record, quantity_col),
                origin,
                line,
                QUANTITY_COLUMN,
            ),
            unit: ShipmentUnit::from_label(cell(&record, unit_col)),
            frequency: ShipmentFrequency::from_label(cell(&record, frequency_col)),
            shipments_per_period: diagnostics.coerce(
                cell(&record, count_col),
                origin,
                line,
                SHIPMENT_COUNT_COLUMN,
            ),
        });
    }

    tracing::debug!("Loaded {} shipment schedules from {}", shipments.len(), origin);
    Ok(shipments)
}
