//! Unit and cadence conversion constants
//!
//! Normalizes shipment quantities to the units recipes are written in and shipment
//! cadences to a per-month basis.

use crate::models::{ShipmentFrequency, ShipmentUnit};

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per pound (international avoirdupois pound, exact)
pub const G_PER_LB: f64 = 453.59237;

// ============================================================================
// Cadence Constants
// ============================================================================

/// Weekly shipments arriving in one month
pub const WEEKLY_PER_MONTH: f64 = 4.0;
/// Biweekly shipments arriving in one month
pub const BIWEEKLY_PER_MONTH: f64 = 2.0;
/// Monthly shipments arriving in one month
pub const MONTHLY_PER_MONTH: f64 = 1.0;

/// Days in the flat month used for days-of-supply
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Days-of-supply reported when usage is zero (cannot run out)
pub const UNBOUNDED_DAYS_OF_SUPPLY: f64 = 999.0;

// ============================================================================
// Conversions
// ============================================================================

/// Shipments per month for one shipment per period of the given cadence
///
/// Unrecognized cadences have no multiplier; callers must not treat that as zero.
pub fn frequency_multiplier(frequency: &ShipmentFrequency) -> Option<f64> {
    match frequency {
        ShipmentFrequency::Weekly => Some(WEEKLY_PER_MONTH),
        ShipmentFrequency::Biweekly => Some(BIWEEKLY_PER_MONTH),
        ShipmentFrequency::Monthly => Some(MONTHLY_PER_MONTH),
        ShipmentFrequency::Unknown(_) => None,
    }
}

/// Factor that converts a shipment quantity into recipe units
///
/// Pounds become grams; every other unit is assumed to already match the recipe
/// column (grams or count).
pub fn usage_units_per_shipment_unit(unit: &ShipmentUnit) -> f64 {
    match unit {
        ShipmentUnit::Pounds => G_PER_LB,
        ShipmentUnit::Grams | ShipmentUnit::Count | ShipmentUnit::Other(_) => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_multiplier() {
        assert_eq!(frequency_multiplier(&ShipmentFrequency::Weekly), Some(4.0));
        assert_eq!(frequency_multiplier(&ShipmentFrequency::Biweekly), Some(2.0));
        assert_eq!(frequency_multiplier(&ShipmentFrequency::Monthly), Some(1.0));
        assert_eq!(
            frequency_multiplier(&ShipmentFrequency::Unknown("daily".to_string())),
            None
        );
    }

    #[test]
    fn test_usage_units_per_shipment_unit() {
        assert_eq!(usage_units_per_shipment_unit(&ShipmentUnit::Pounds), 453.59237);
        assert_eq!(usage_units_per_shipment_unit(&ShipmentUnit::Grams), 1.0);
        assert_eq!(usage_units_per_shipment_unit(&ShipmentUnit::Count), 1.0);
        assert_eq!(
            usage_units_per_shipment_unit(&ShipmentUnit::Other("kg".to_string())),
            1.0
        );
    }
}
