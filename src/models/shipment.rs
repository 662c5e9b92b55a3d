//! Shipment schedule model
//!
//! One row per supplied ingredient: how much arrives per shipment, in which unit, and
//! how often.

use serde::{Deserialize, Serialize};

/// Unit a shipment quantity is expressed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentUnit {
    Grams,
    Pounds,
    Count,
    /// Any other label, passed through without conversion
    Other(String),
}

impl ShipmentUnit {
    /// Parse a unit label from the shipment table
    pub fn from_label(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "lbs" | "lb" | "pound" | "pounds" => ShipmentUnit::Pounds,
            "g" | "gram" | "grams" => ShipmentUnit::Grams,
            "count" | "each" | "pcs" | "pieces" | "units" => ShipmentUnit::Count,
            _ => ShipmentUnit::Other(s.trim().to_string()),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            ShipmentUnit::Grams => "g",
            ShipmentUnit::Pounds => "lbs",
            ShipmentUnit::Count => "count",
            ShipmentUnit::Other(label) => label,
        }
    }
}

/// Shipment cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentFrequency {
    Weekly,
    Biweekly,
    Monthly,
    /// Missing or unrecognized value (raw text kept for reporting)
    Unknown(String),
}

impl ShipmentFrequency {
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "weekly" => ShipmentFrequency::Weekly,
            "biweekly" => ShipmentFrequency::Biweekly,
            "monthly" => ShipmentFrequency::Monthly,
            _ => ShipmentFrequency::Unknown(s.trim().to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ShipmentFrequency::Unknown(_))
    }
}

/// Supply schedule for one ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentSchedule {
    /// Ingredient name in the supplier's vocabulary, e.g. "Beef"
    pub ingredient_name: String,
    pub quantity_per_shipment: f64,
    pub unit: ShipmentUnit,
    pub frequency: ShipmentFrequency,
    /// Number of shipments per frequency period
    pub shipments_per_period: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_label() {
        assert_eq!(ShipmentUnit::from_label(" LBS "), ShipmentUnit::Pounds);
        assert_eq!(ShipmentUnit::from_label("lbs"), ShipmentUnit::Pounds);
        assert_eq!(ShipmentUnit::from_label("g"), ShipmentUnit::Grams);
        assert_eq!(ShipmentUnit::from_label("pcs"), ShipmentUnit::Count);
        assert_eq!(
            ShipmentUnit::from_label("rolls"),
            ShipmentUnit::Other("rolls".to_string())
        );
    }

    #[test]
    fn test_frequency_from_label() {
        assert_eq!(ShipmentFrequency::from_label("Weekly"), ShipmentFrequency::Weekly);
        assert_eq!(ShipmentFrequency::from_label(" biweekly "), ShipmentFrequency::Biweekly);
        assert_eq!(ShipmentFrequency::from_label("MONTHLY"), ShipmentFrequency::Monthly);
        assert!(!ShipmentFrequency::from_label("daily").is_known());
        assert!(!ShipmentFrequency::from_label("").is_known());
    }
}
