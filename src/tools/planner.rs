//! Meal Planner Tools
//!
//! Candidate selection and plan assembly on top of the feeding engine.

use serde::Serialize;

use crate::feeding::{
    rank_bundles, recommend_package_sizes, BundleFailure, FeedingTables, PortionResult,
    ShoppingList, SupplyProjection,
};
use crate::models::{ActivityLevel, DogProfile, LifeStage, MealBundle, SizeCategory};

/// Most bundles priced for one plan
pub const MAX_CANDIDATES: usize = 10;

/// Response for classify_dog
#[derive(Debug, Serialize)]
pub struct ClassifyDogResponse {
    pub weight_lbs: f64,
    pub size_category: SizeCategory,
    pub age_months: Option<u32>,
    pub life_stage: Option<LifeStage>,
}

/// Response for calculate_portions
#[derive(Debug, Serialize)]
pub struct PortionsResponse {
    pub dog: DogProfile,
    pub size_category: SizeCategory,
    pub portions: PortionResult,
}

/// Response for plan_meals
#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub generated_at: String,
    pub dog: DogProfile,
    pub size_category: SizeCategory,
    pub preference: Option<String>,
    pub portions: PortionResult,
    pub supply: SupplyProjection,
    pub candidates_considered: usize,
    pub recommendations: Vec<ShoppingList>,
    pub skipped: Vec<BundleFailure>,
}

/// Response for recommend_packages
#[derive(Debug, Serialize)]
pub struct BundleDetailResponse {
    pub dog: DogProfile,
    pub portions: PortionResult,
    pub supply: SupplyProjection,
    pub shopping_list: ShoppingList,
}

/// Size category and (optionally) life stage for a dog
pub fn classify_dog(
    weight_lbs: f64,
    age_months: Option<u32>,
) -> Result<ClassifyDogResponse, String> {
    crate::models::validate_weight(weight_lbs).map_err(|e| e.to_string())?;
    Ok(ClassifyDogResponse {
        weight_lbs,
        size_category: SizeCategory::for_weight(weight_lbs),
        age_months,
        life_stage: age_months.map(LifeStage::for_age_months),
    })
}

/// Active bundles curated for the dog's size and life stage, optionally
/// narrowed to those whose tags contain `preference`
pub fn select_candidates<'a>(
    bundles: &'a [MealBundle],
    dog: &DogProfile,
    preference: Option<&str>,
) -> Vec<&'a MealBundle> {
    let size = dog.size_category();
    bundles
        .iter()
        .filter(|b| b.is_active)
        .filter(|b| b.size_category == size && b.life_stage == dog.life_stage)
        .filter(|b| preference.map_or(true, |p| b.has_preference(p)))
        .take(MAX_CANDIDATES)
        .collect()
}

/// Daily portions for a dog
pub fn calculate_portions(
    tables: &FeedingTables,
    dog: DogProfile,
) -> Result<PortionsResponse, String> {
    let portions = tables
        .calculate_portions(dog.weight_lbs, dog.activity_level, dog.life_stage)
        .map_err(|e| format!("Failed to calculate portions: {}", e))?;

    Ok(PortionsResponse {
        dog,
        size_category: dog.size_category(),
        portions,
    })
}

/// Portions, supply, and ranked shopping lists for every matching bundle
pub fn plan_meals(
    tables: &FeedingTables,
    dog: DogProfile,
    bundles: &[MealBundle],
    preference: Option<&str>,
) -> Result<MealPlanResponse, String> {
    let supply = tables
        .calculate_45_day_supply(dog.weight_lbs, dog.activity_level, dog.life_stage)
        .map_err(|e| format!("Failed to project supply: {}", e))?;

    let candidates = select_candidates(bundles, &dog, preference);
    tracing::info!(
        weight_lbs = dog.weight_lbs,
        stage = dog.life_stage.as_str(),
        offered = bundles.len(),
        candidates = candidates.len(),
        "planning meals"
    );

    let ranked = rank_bundles(&supply, candidates.iter().copied());

    Ok(MealPlanResponse {
        generated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        dog,
        size_category: dog.size_category(),
        preference: preference.map(String::from),
        portions: supply.daily_portions,
        supply,
        candidates_considered: candidates.len(),
        recommendations: ranked.recommendations,
        skipped: ranked.failures,
    })
}

/// Shopping list for one bundle; the bundle's own life stage is used when none is given
pub fn bundle_detail(
    tables: &FeedingTables,
    weight_lbs: f64,
    activity_level: ActivityLevel,
    life_stage: Option<LifeStage>,
    bundle: &MealBundle,
) -> Result<BundleDetailResponse, String> {
    let dog = DogProfile::new(
        weight_lbs,
        activity_level,
        life_stage.unwrap_or(bundle.life_stage),
    )
    .map_err(|e| e.to_string())?;

    let supply = tables
        .calculate_45_day_supply(dog.weight_lbs, dog.activity_level, dog.life_stage)
        .map_err(|e| format!("Failed to project supply: {}", e))?;

    let shopping_list = recommend_package_sizes(&supply, bundle)
        .map_err(|e| format!("Failed to recommend packages: {}", e))?;

    Ok(BundleDetailResponse {
        dog,
        portions: supply.daily_portions,
        supply,
        shopping_list,
    })
}
