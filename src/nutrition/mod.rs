//! Nutrition calculation module
//!
//! Handles unit conversions and rounding for feeding figures.

pub mod converter;
pub mod units;

pub use converter::{oz_to_cups, oz_to_lbs, round_to, to_lbs, truncate_calories};
pub use units::{PackageUnit, G_PER_KG, G_PER_LB, OZ_PER_LB};
