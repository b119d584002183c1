//! Chowplan MCP Server Implementation
//!
//! Implements the MCP server exposing the feeding engine as tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::feeding::{BundleFailure, FeedingError, FeedingResult, FeedingTables};
use crate::models::{
    ActivityLevel, DogProfile, LifeStage, MealBundle, PreferenceTag, Product, ProductRole,
    SizeCategory,
};
use crate::nutrition::PackageUnit;
use crate::tools::planner;
use crate::tools::status::StatusTracker;

/// Chowplan MCP Service
#[derive(Clone)]
pub struct ChowplanService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    tables: &'static FeedingTables,
    tool_router: ToolRouter<ChowplanService>,
}

impl ChowplanService {
    pub fn new(tables: &'static FeedingTables) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            tables,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Dog Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EstimateCaloriesParams {
    /// Dog weight in pounds
    pub weight_lbs: f64,
    /// low, moderate (default) or high
    pub activity_level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DogParams {
    /// Dog weight in pounds
    pub weight_lbs: f64,
    /// low, moderate (default) or high
    pub activity_level: Option<String>,
    /// puppy, adult (default) or senior
    pub life_stage: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyDogParams {
    /// Dog weight in pounds
    pub weight_lbs: f64,
    /// Age in months (optional)
    pub age_months: Option<u32>,
}

// ============================================================================
// Product / Bundle Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProductParams {
    pub id: i64,
    pub brand: String,
    pub name: String,
    /// dry, wet or treat
    pub role: String,
    pub package_size: f64,
    /// oz, lb (default), g or kg
    pub package_unit: Option<String>,
    pub price: f64,
    pub calories_per_oz: Option<f64>,
    pub preference: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BundleParams {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub dry_food: ProductParams,
    pub wet_food: ProductParams,
    pub treats: ProductParams,
    /// small, medium or large
    pub size_category: String,
    /// puppy, adult or senior
    pub life_stage: String,
    #[serde(default)]
    pub preference_tags: Vec<String>,
    /// Inactive bundles are never recommended (default true)
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecommendPackagesParams {
    /// Dog weight in pounds
    pub weight_lbs: f64,
    /// low, moderate (default) or high
    pub activity_level: Option<String>,
    /// puppy, adult or senior; defaults to the bundle's life stage
    pub life_stage: Option<String>,
    pub bundle: BundleParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PlanMealsParams {
    /// Dog weight in pounds
    pub weight_lbs: f64,
    /// low, moderate (default) or high
    pub activity_level: Option<String>,
    /// puppy, adult or senior; takes priority over age_months
    pub life_stage: Option<String>,
    /// Used to derive the life stage when life_stage is omitted
    pub age_months: Option<u32>,
    /// Only consider bundles with a tag containing this text (e.g. grain)
    pub preference: Option<String>,
    pub bundles: Vec<BundleParams>,
}

impl TryFrom<ProductParams> for Product {
    type Error = FeedingError;

    fn try_from(p: ProductParams) -> FeedingResult<Self> {
        Ok(Product {
            id: p.id,
            brand: p.brand,
            name: p.name,
            role: ProductRole::parse(&p.role)?,
            package_size: p.package_size,
            package_unit: p
                .package_unit
                .as_deref()
                .map(PackageUnit::parse)
                .transpose()?
                .unwrap_or_default(),
            price: p.price,
            calories_per_oz: p.calories_per_oz,
            preference: p.preference.as_deref().map(PreferenceTag::parse).transpose()?,
        })
    }
}

impl TryFrom<BundleParams> for MealBundle {
    type Error = FeedingError;

    fn try_from(b: BundleParams) -> FeedingResult<Self> {
        Ok(MealBundle {
            id: b.id,
            name: b.name,
            brand: b.brand,
            dry_food: b.dry_food.try_into()?,
            wet_food: b.wet_food.try_into()?,
            treats: b.treats.try_into()?,
            size_category: SizeCategory::parse(&b.size_category)?,
            life_stage: LifeStage::parse(&b.life_stage)?,
            preference_tags: b
                .preference_tags
                .iter()
                .map(|t| PreferenceTag::parse(t))
                .collect::<FeedingResult<Vec<_>>>()?,
            is_active: b.is_active.unwrap_or(true),
        })
    }
}

// ============================================================================
// Response Structs
// ============================================================================

#[derive(Debug, Serialize)]
struct EstimateCaloriesResponse {
    weight_lbs: f64,
    activity_level: ActivityLevel,
    min_calories: u32,
    max_calories: u32,
    daily_calories: u32,
}

// ============================================================================
// Helpers
// ============================================================================

fn activity_or_default(s: Option<&str>) -> ActivityLevel {
    s.map(ActivityLevel::from_str).unwrap_or_default()
}

fn dog_from_params(
    weight_lbs: f64,
    activity: Option<&str>,
    stage: Option<&str>,
) -> Result<DogProfile, McpError> {
    DogProfile::new(
        weight_lbs,
        activity_or_default(activity),
        stage.map(LifeStage::from_str).unwrap_or_default(),
    )
    .map_err(invalid_params)
}

fn invalid_params(e: FeedingError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ChowplanService {
    // --- Status ---

    #[tool(description = "Get the current status of the chowplan service including build info, feeding tables source, and process information")]
    async fn chowplan_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        to_json(&status)
    }

    #[tool(description = "Get instructions for building a dog-food plan. Call this first when unsure which tool to use or how to describe products and bundles.")]
    fn feeding_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::FEEDING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(FEEDING_INSTRUCTIONS)]))
    }

    // --- Calculations ---

    #[tool(description = "Estimate a dog's daily calories from weight (lbs) and activity level, before life-stage adjustment")]
    fn estimate_daily_calories(&self, Parameters(p): Parameters<EstimateCaloriesParams>) -> Result<CallToolResult, McpError> {
        let activity_level = activity_or_default(p.activity_level.as_deref());
        let range = self.tables.calorie_range(p.weight_lbs).map_err(invalid_params)?;
        let daily_calories = self
            .tables
            .estimate_daily_calories(p.weight_lbs, activity_level)
            .map_err(invalid_params)?;
        to_json(&EstimateCaloriesResponse {
            weight_lbs: p.weight_lbs,
            activity_level,
            min_calories: range.min,
            max_calories: range.max,
            daily_calories,
        })
    }

    #[tool(description = "Calculate daily portions of wet food, dry food (oz and cups) and treats for a dog")]
    fn calculate_portions(&self, Parameters(p): Parameters<DogParams>) -> Result<CallToolResult, McpError> {
        let dog = dog_from_params(p.weight_lbs, p.activity_level.as_deref(), p.life_stage.as_deref())?;
        let result = planner::calculate_portions(self.tables, dog)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Calculate daily portions plus 45-day totals (lbs and oz) of wet food, dry food and treats")]
    fn calculate_45_day_supply(&self, Parameters(p): Parameters<DogParams>) -> Result<CallToolResult, McpError> {
        let dog = dog_from_params(p.weight_lbs, p.activity_level.as_deref(), p.life_stage.as_deref())?;
        let supply = self
            .tables
            .calculate_45_day_supply(dog.weight_lbs, dog.activity_level, dog.life_stage)
            .map_err(invalid_params)?;
        to_json(&supply)
    }

    #[tool(description = "Recommend package quantities and cost for one meal bundle. Each role gets whole packages covering 45 days plus one spare.")]
    fn recommend_packages(&self, Parameters(p): Parameters<RecommendPackagesParams>) -> Result<CallToolResult, McpError> {
        let bundle = MealBundle::try_from(p.bundle).map_err(invalid_params)?;
        let life_stage = p.life_stage.as_deref().map(LifeStage::from_str);
        let result = planner::bundle_detail(
            self.tables,
            p.weight_lbs,
            activity_or_default(p.activity_level.as_deref()),
            life_stage,
            &bundle,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Build a full plan: pick bundles matching the dog's size and life stage (and optional preference), price each, and rank them cheapest first. Bundles with bad product data are listed under skipped.")]
    fn plan_meals(&self, Parameters(p): Parameters<PlanMealsParams>) -> Result<CallToolResult, McpError> {
        let activity_level = activity_or_default(p.activity_level.as_deref());
        let dog = match (p.life_stage.as_deref(), p.age_months) {
            (None, Some(age)) => DogProfile::from_age(p.weight_lbs, age, activity_level),
            (stage, _) => DogProfile::new(
                p.weight_lbs,
                activity_level,
                stage.map(LifeStage::from_str).unwrap_or_default(),
            ),
        }
        .map_err(invalid_params)?;
        let preference = p.preference.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut bundles = Vec::with_capacity(p.bundles.len());
        let mut rejected = Vec::new();
        for params in p.bundles {
            let (id, name) = (params.id, format!("{} - {}", params.brand, params.name));
            match MealBundle::try_from(params) {
                Ok(bundle) => bundles.push(bundle),
                Err(e) => {
                    tracing::warn!("Rejected bundle {} ({}): {}", id, name, e);
                    rejected.push(BundleFailure { bundle_id: id, bundle_name: name, error: e.to_string() });
                }
            }
        }

        let mut plan = planner::plan_meals(self.tables, dog, &bundles, preference)
            .map_err(|e| McpError::invalid_params(e, None))?;
        plan.skipped.extend(rejected);
        to_json(&plan)
    }

    #[tool(description = "Classify a dog into a size category (small/medium/large) and, given age in months, a life stage (puppy/adult/senior)")]
    fn classify_dog(&self, Parameters(p): Parameters<ClassifyDogParams>) -> Result<CallToolResult, McpError> {
        let result = planner::classify_dog(p.weight_lbs, p.age_months)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for ChowplanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "chowplan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Chowplan Dog Food Planner".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Chowplan - dog-food portions and purchase plans. \
                 Call feeding_instructions first. \
                 Calculations: estimate_daily_calories, calculate_portions, calculate_45_day_supply. \
                 Shopping: recommend_packages (one bundle), plan_meals (filter + rank bundles, cheapest first). \
                 Helpers: classify_dog, chowplan_status. \
                 Nothing is stored; pass the dog and bundles on every call."
                    .into(),
            ),
        }
    }
}
