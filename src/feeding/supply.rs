//! Multi-day supply projection

use serde::{Deserialize, Serialize};

use super::portions::PortionResult;
use super::tables::FeedingTables;
use super::FeedingResult;
use crate::models::{ActivityLevel, LifeStage, ProductRole};
use crate::nutrition::{oz_to_lbs, round_to};

/// Food needed over the planning horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyProjection {
    pub daily_portions: PortionResult,
    pub days: u32,
    pub wet_food_lbs: f64,
    pub wet_food_oz: f64,
    pub dry_food_lbs: f64,
    pub dry_food_oz: f64,
    pub treat_lbs: f64,
    pub treat_oz: f64,
}

impl SupplyProjection {
    /// Pounds needed for one bundle role
    pub fn requirement_lbs(&self, role: ProductRole) -> f64 {
        match role {
            ProductRole::Dry => self.dry_food_lbs,
            ProductRole::Wet => self.wet_food_lbs,
            ProductRole::Treat => self.treat_lbs,
        }
    }
}

impl FeedingTables {
    /// Scale rounded daily portions up to the planning horizon
    pub fn project_supply(&self, daily: PortionResult) -> SupplyProjection {
        let days = self.supply_days as f64;

        let wet_total_oz = daily.wet_food_oz * days;
        let dry_total_oz = daily.dry_food_oz * days;
        let treat_total_oz = daily.treat_oz * days;

        SupplyProjection {
            daily_portions: daily,
            days: self.supply_days,
            wet_food_lbs: round_to(oz_to_lbs(wet_total_oz), 1),
            wet_food_oz: round_to(wet_total_oz, 1),
            dry_food_lbs: round_to(oz_to_lbs(dry_total_oz), 1),
            dry_food_oz: round_to(dry_total_oz, 1),
            treat_lbs: round_to(oz_to_lbs(treat_total_oz), 1),
            treat_oz: round_to(treat_total_oz, 1),
        }
    }

    /// Portions and 45-day (or configured horizon) totals for a dog
    pub fn calculate_45_day_supply(
        &self,
        weight_lbs: f64,
        activity_level: ActivityLevel,
        life_stage: LifeStage,
    ) -> FeedingResult<SupplyProjection> {
        let daily = self.calculate_portions(weight_lbs, activity_level, life_stage)?;
        Ok(self.project_supply(daily))
    }
}

/// Supply projection using the process-wide tables
pub fn calculate_45_day_supply(
    weight_lbs: f64,
    activity_level: ActivityLevel,
    life_stage: LifeStage,
) -> FeedingResult<SupplyProjection> {
    FeedingTables::global().calculate_45_day_supply(weight_lbs, activity_level, life_stage)
}
