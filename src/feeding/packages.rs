//! Package recommendation, cost aggregation and bundle ranking
//!
//! Quantities are `floor(requirement / package) + 1`: an exact multiple still
//! buys one extra package, so the supply never runs out mid-cycle.

use std::cmp::Ordering;

use serde::Serialize;

use super::supply::SupplyProjection;
use super::{FeedingError, FeedingResult};
use crate::models::{MealBundle, Product, ProductRole};
use crate::nutrition::round_to;

/// Packages to buy for one bundle role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageLine {
    pub role: ProductRole,
    pub product: Product,
    pub quantity: u32,
    pub requirement_lbs: f64,
    pub package_size_lbs: f64,
    pub total_lbs: f64,
    pub line_cost: f64,
}

/// Shopping list for one bundle over the supply horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingList {
    pub bundle_id: i64,
    pub bundle_name: String,
    pub dry_food: PackageLine,
    pub wet_food: PackageLine,
    pub treats: PackageLine,
    pub total_cost: f64,
    pub cost_per_day: f64,
}

/// A bundle that could not be priced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleFailure {
    pub bundle_id: i64,
    pub bundle_name: String,
    pub error: String,
}

/// Bundles ordered cheapest first, plus any that failed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedBundles {
    pub recommendations: Vec<ShoppingList>,
    pub failures: Vec<BundleFailure>,
}

/// Whole packages needed to cover a requirement, with one spare
pub fn package_quantity(requirement_lbs: f64, package_size_lbs: f64) -> FeedingResult<u32> {
    if !package_size_lbs.is_finite() || package_size_lbs <= 0.0 {
        return Err(FeedingError::InvalidInput(format!(
            "package size must be positive, got {}",
            package_size_lbs
        )));
    }
    if !requirement_lbs.is_finite() || requirement_lbs < 0.0 {
        return Err(FeedingError::InvalidInput(format!(
            "requirement must be non-negative, got {}",
            requirement_lbs
        )));
    }
    let whole = (requirement_lbs / package_size_lbs).floor();
    if whole >= u32::MAX as f64 {
        return Err(FeedingError::InvalidInput(format!(
            "{} lbs of {} lb packages is too many to count",
            requirement_lbs, package_size_lbs
        )));
    }
    Ok(whole as u32 + 1)
}

fn package_line(
    supply: &SupplyProjection,
    bundle: &MealBundle,
    role: ProductRole,
) -> FeedingResult<PackageLine> {
    let product = bundle.product(role);
    let package_size_lbs = product.package_size_lbs()?;
    let requirement_lbs = supply.requirement_lbs(role);
    let quantity =
        package_quantity(requirement_lbs, package_size_lbs).map_err(|e| match e {
            FeedingError::InvalidInput(reason) => FeedingError::InvalidProduct {
                product_id: product.id,
                reason,
            },
            other => other,
        })?;

    tracing::debug!(
        role = role.as_str(),
        product_id = product.id,
        requirement_lbs,
        package_size_lbs,
        quantity,
        "package quantity"
    );

    Ok(PackageLine {
        role,
        product: product.clone(),
        quantity,
        requirement_lbs,
        package_size_lbs,
        total_lbs: quantity as f64 * package_size_lbs,
        line_cost: quantity as f64 * product.price,
    })
}

/// Shopping list for one bundle
pub fn recommend_package_sizes(
    supply: &SupplyProjection,
    bundle: &MealBundle,
) -> FeedingResult<ShoppingList> {
    bundle.validate()?;
    let dry_food = package_line(supply, bundle, ProductRole::Dry)?;
    let wet_food = package_line(supply, bundle, ProductRole::Wet)?;
    let treats = package_line(supply, bundle, ProductRole::Treat)?;

    let total_cost = dry_food.line_cost + wet_food.line_cost + treats.line_cost;
    let days = supply.days.max(1) as f64;

    Ok(ShoppingList {
        bundle_id: bundle.id,
        bundle_name: bundle.display_name(),
        dry_food,
        wet_food,
        treats,
        total_cost: round_to(total_cost, 2),
        cost_per_day: round_to(total_cost / days, 2),
    })
}

/// Cheapest first; equal totals fall back to bundle id, then input order
fn compare_cost(a: &ShoppingList, b: &ShoppingList) -> Ordering {
    a.total_cost
        .total_cmp(&b.total_cost)
        .then_with(|| a.bundle_id.cmp(&b.bundle_id))
}

/// Price every bundle and rank them; a bad bundle is reported, not fatal
pub fn rank_bundles<'a, I>(supply: &SupplyProjection, bundles: I) -> RankedBundles
where
    I: IntoIterator<Item = &'a MealBundle>,
{
    let mut ranked = RankedBundles::default();

    for bundle in bundles {
        match recommend_package_sizes(supply, bundle) {
            Ok(list) => ranked.recommendations.push(list),
            Err(e) => {
                tracing::warn!("Skipping bundle {} ({}): {}", bundle.id, bundle.display_name(), e);
                ranked.failures.push(BundleFailure {
                    bundle_id: bundle.id,
                    bundle_name: bundle.display_name(),
                    error: e.to_string(),
                });
            }
        }
    }

    ranked.recommendations.sort_by(compare_cost);
    ranked
}
