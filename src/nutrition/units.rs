//! Unit types and conversion constants
//!
//! Package sizes arrive in whatever unit the retailer prints on the bag.
//! Everything is normalised to pounds before quantities are computed.

use serde::{Deserialize, Serialize};

use crate::feeding::{FeedingError, FeedingResult};

/// Unit a product's package size is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PackageUnit {
    /// Ounces (canned wet food, small treat pouches)
    Oz,
    /// Pounds (kibble bags)
    #[default]
    #[serde(alias = "lbs")]
    Lb,
    /// Grams
    G,
    /// Kilograms
    Kg,
}

impl PackageUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageUnit::Oz => "oz",
            PackageUnit::Lb => "lb",
            PackageUnit::G => "g",
            PackageUnit::Kg => "kg",
        }
    }

    /// Parse a unit string, rejecting anything that is not a weight unit
    pub fn parse(s: &str) -> FeedingResult<Self> {
        let lower = s.to_lowercase();
        match lower.trim() {
            "oz" | "ounce" | "ounces" => Ok(PackageUnit::Oz),
            "lb" | "lbs" | "pound" | "pounds" => Ok(PackageUnit::Lb),
            "g" | "gram" | "grams" => Ok(PackageUnit::G),
            "kg" | "kilogram" | "kilograms" => Ok(PackageUnit::Kg),
            other => Err(FeedingError::InvalidEnum {
                field: "package_unit",
                value: other.to_string(),
            }),
        }
    }

    /// Conversion factor from this unit to pounds
    pub fn lbs_per_unit(&self) -> f64 {
        match self {
            PackageUnit::Oz => 1.0 / OZ_PER_LB,
            PackageUnit::Lb => 1.0,
            PackageUnit::G => 1.0 / G_PER_LB,
            PackageUnit::Kg => G_PER_KG / G_PER_LB,
        }
    }
}

// ============================================================================
// Weight Conversion Constants
// ============================================================================

/// Ounces per pound
pub const OZ_PER_LB: f64 = 16.0;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;
