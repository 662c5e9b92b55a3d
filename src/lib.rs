//! Ingredient Supply Monitor (ISM) Library
//!
//! Ingredient usage from monthly sales and recipes, compared against shipment supply.

pub mod build_info;
pub mod config;
pub mod data;
pub mod inventory;
pub mod mcp;
pub mod models;
pub mod tools;
