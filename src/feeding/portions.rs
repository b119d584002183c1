//! Daily portion calculation

use serde::{Deserialize, Serialize};

use super::tables::FeedingTables;
use super::FeedingResult;
use crate::models::{ActivityLevel, LifeStage};
use crate::nutrition::{oz_to_cups, round_to, truncate_calories};

/// Daily portions for one dog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionResult {
    /// After the life-stage adjustment
    pub daily_calories: u32,
    pub wet_food_oz: f64,
    pub dry_food_oz: f64,
    pub dry_food_cups: f64,
    pub treat_oz: f64,
    pub treat_calories: u32,
}

impl FeedingTables {
    /// Apply the life-stage multiplier, truncating to whole calories
    pub fn adjust_for_life_stage(&self, daily_calories: u32, life_stage: LifeStage) -> u32 {
        match life_stage {
            LifeStage::Adult => daily_calories,
            stage => truncate_calories(
                daily_calories as f64 * self.life_stage_multipliers.for_stage(stage),
            ),
        }
    }

    /// Split already-adjusted daily calories into wet, dry and treat portions
    pub fn split_portions(&self, daily_calories: u32) -> PortionResult {
        let calories = daily_calories as f64;

        let wet_calories = calories * self.ratios.wet;
        let dry_calories = calories * self.ratios.dry;
        let treat_calories = calories * self.ratios.treat;

        let wet_oz = wet_calories / self.densities.wet_per_oz;
        let dry_oz = dry_calories / self.densities.dry_per_oz;
        let treat_oz = treat_calories / self.densities.treat_per_oz;

        PortionResult {
            daily_calories,
            wet_food_oz: round_to(wet_oz, 1),
            dry_food_oz: round_to(dry_oz, 1),
            dry_food_cups: round_to(oz_to_cups(dry_oz, self.oz_per_cup), 2),
            treat_oz: round_to(treat_oz, 1),
            treat_calories: truncate_calories(treat_calories),
        }
    }

    /// Daily portions for a dog
    pub fn calculate_portions(
        &self,
        weight_lbs: f64,
        activity_level: ActivityLevel,
        life_stage: LifeStage,
    ) -> FeedingResult<PortionResult> {
        let base = self.estimate_daily_calories(weight_lbs, activity_level)?;
        let daily_calories = self.adjust_for_life_stage(base, life_stage);
        tracing::debug!(
            weight_lbs,
            activity = activity_level.as_str(),
            stage = life_stage.as_str(),
            base,
            daily_calories,
            "calculated daily calories"
        );
        Ok(self.split_portions(daily_calories))
    }
}

/// Daily portions using the process-wide tables
pub fn calculate_portions(
    weight_lbs: f64,
    activity_level: ActivityLevel,
    life_stage: LifeStage,
) -> FeedingResult<PortionResult> {
    FeedingTables::global().calculate_portions(weight_lbs, activity_level, life_stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portions(weight: f64, level: ActivityLevel, stage: LifeStage) -> PortionResult {
        FeedingTables::default()
            .calculate_portions(weight, level, stage)
            .unwrap()
    }

    #[test]
    fn test_ten_pound_adult() {
        let p = portions(10.0, ActivityLevel::Moderate, LifeStage::Adult);
        assert_eq!(p.daily_calories, 325);
        assert_eq!(p.wet_food_oz, 3.3);
        assert_eq!(p.dry_food_oz, 2.6);
        assert_eq!(p.dry_food_cups, 0.64);
        assert_eq!(p.treat_oz, 0.4);
        assert_eq!(p.treat_calories, 32);
    }

    #[test]
    fn test_life_stage_adjustment() {
        let senior = portions(40.0, ActivityLevel::Moderate, LifeStage::Senior);
        assert_eq!(senior.daily_calories, 843);
        assert_eq!(senior.wet_food_oz, 8.4);
        assert_eq!(senior.dry_food_cups, 1.66);
        assert_eq!(senior.treat_oz, 1.0);

        let puppy = portions(70.0, ActivityLevel::Low, LifeStage::Puppy);
        assert_eq!(puppy.daily_calories, 1332);
        assert_eq!(puppy.wet_food_oz, 13.3);
        assert_eq!(puppy.dry_food_oz, 10.5);
        assert_eq!(puppy.dry_food_cups, 2.63);
        assert_eq!(puppy.treat_calories, 133);
    }

    #[test]
    fn test_giant_puppy() {
        let p = portions(150.0, ActivityLevel::High, LifeStage::Puppy);
        assert_eq!(p.daily_calories, 2656);
        assert_eq!(p.wet_food_oz, 26.6);
        assert_eq!(p.dry_food_oz, 21.0);
        assert_eq!(p.dry_food_cups, 5.24);
        assert_eq!(p.treat_oz, 3.0);
        assert_eq!(p.treat_calories, 265);
    }

    #[test]
    fn test_treats_are_on_top_of_wet_and_dry() {
        let tables = FeedingTables::default();
        let p = tables.split_portions(1000);
        let wet_cal = p.wet_food_oz * tables.densities.wet_per_oz;
        assert_eq!(wet_cal, 250.0);
        assert_eq!(p.treat_calories, 100);
    }

    #[test]
    fn test_cups_use_unrounded_ounces() {
        let tables = FeedingTables::default();
        for calories in [163, 325, 550, 843, 1275, 2656] {
            let p = tables.split_portions(calories);
            let dry_oz = calories as f64 * tables.ratios.dry / tables.densities.dry_per_oz;
            assert_eq!(p.dry_food_cups, round_to(dry_oz / 4.0, 2));
        }
    }

    #[test]
    fn test_portions_monotonic_in_weight() {
        let tables = FeedingTables::default();
        for stage in [LifeStage::Puppy, LifeStage::Adult, LifeStage::Senior] {
            let mut previous: Option<PortionResult> = None;
            for weight in 1..=160 {
                let p = tables
                    .calculate_portions(weight as f64, ActivityLevel::Moderate, stage)
                    .unwrap();
                if let Some(prev) = previous {
                    assert!(p.daily_calories >= prev.daily_calories);
                    assert!(p.wet_food_oz >= prev.wet_food_oz);
                    assert!(p.dry_food_oz >= prev.dry_food_oz);
                    assert!(p.treat_oz >= prev.treat_oz);
                }
                previous = Some(p);
            }
        }
    }
}
