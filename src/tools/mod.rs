//! ISM Tools module
//!
//! MCP tool implementations for the Ingredient Supply Monitor.

pub mod sales;
pub mod status;
pub mod supply;
pub mod usage;
