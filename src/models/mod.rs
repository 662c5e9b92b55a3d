//! Data models
//!
//! Rust structs for the input tables and the derived comparison table.

mod comparison;
mod recipe;
mod sale;
mod shipment;

pub use comparison::{ComparisonRow, DataIssue, SupplyStatus};
pub use recipe::{RecipeRow, RecipeTable};
pub use sale::SaleRecord;
pub use shipment::{ShipmentFrequency, ShipmentSchedule, ShipmentUnit};
