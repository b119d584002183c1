//! Unit conversion functions
//!
//! Ounce/pound/cup conversions and the fixed-precision rounding used by every
//! figure the planner reports.

use super::units::{PackageUnit, OZ_PER_LB};

/// Round to a fixed number of decimal places, halves away from zero
///
/// Examples:
/// - `round_to(3.25, 1)` -> 3.3
/// - `round_to(0.6414, 2)` -> 0.64
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Convert ounces to pounds
pub fn oz_to_lbs(oz: f64) -> f64 {
    oz / OZ_PER_LB
}

/// Convert a package size in the given unit to pounds
pub fn to_lbs(quantity: f64, unit: PackageUnit) -> f64 {
    match unit {
        // Keep pound sizes bit-exact so quantity math matches hand calculations
        PackageUnit::Lb => quantity,
        PackageUnit::Oz => oz_to_lbs(quantity),
        other => quantity * other.lbs_per_unit(),
    }
}

/// Convert ounces of dry food to cups
pub fn oz_to_cups(oz: f64, oz_per_cup: f64) -> f64 {
    oz / oz_per_cup
}

/// Truncate toward zero into a whole calorie count
pub fn truncate_calories(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value as u32
    }
}
