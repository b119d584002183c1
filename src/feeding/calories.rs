//! Daily calorie estimation
//!
//! Weight is mapped onto the calorie chart by rounding *up* to the next
//! calibration point (a 26 lb dog uses the 30 lb bracket), never interpolated.

use serde::Serialize;

use super::tables::FeedingTables;
use super::{FeedingError, FeedingResult};
use crate::models::{validate_weight, ActivityLevel};
use crate::nutrition::truncate_calories;

/// Daily calorie range for a weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalorieRange {
    pub min: u32,
    pub max: u32,
}

impl CalorieRange {
    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

impl FeedingTables {
    /// Look up the calorie range for a weight
    pub fn calorie_range(&self, weight_lbs: f64) -> FeedingResult<CalorieRange> {
        validate_weight(weight_lbs)?;

        let (first, last) = match (self.calorie_chart.first(), self.calorie_chart.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(FeedingError::Config("calorie chart is empty".into())),
        };

        let bracket = if weight_lbs <= first.weight_lbs {
            first
        } else if weight_lbs >= last.weight_lbs {
            let steps = ((weight_lbs - last.weight_lbs) / self.extrapolation.step_lbs).floor();
            let extend = |base: u32, per_step: u32| {
                if steps >= u32::MAX as f64 {
                    return None;
                }
                (steps as u32).checked_mul(per_step)?.checked_add(base)
            };
            let range = match (
                extend(last.min_calories, self.extrapolation.min_per_step),
                extend(last.max_calories, self.extrapolation.max_per_step),
            ) {
                (Some(min), Some(max)) => CalorieRange { min, max },
                _ => {
                    return Err(FeedingError::InvalidInput(format!(
                        "weight {} lbs is too far beyond the calorie chart",
                        weight_lbs
                    )))
                }
            };
            tracing::debug!(weight_lbs, steps, ?range, "extrapolated calorie range");
            return Ok(range);
        } else {
            // First calibration point at or above the weight
            let idx = self.calorie_chart.partition_point(|b| b.weight_lbs < weight_lbs);
            &self.calorie_chart[idx]
        };

        tracing::debug!(weight_lbs, bracket_lbs = bracket.weight_lbs, "selected calorie bracket");
        Ok(CalorieRange {
            min: bracket.min_calories,
            max: bracket.max_calories,
        })
    }

    /// Daily calories for a weight and activity level, before life-stage adjustment
    pub fn estimate_daily_calories(
        &self,
        weight_lbs: f64,
        activity_level: ActivityLevel,
    ) -> FeedingResult<u32> {
        let range = self.calorie_range(weight_lbs)?;
        let multiplier = self.activity_multipliers.for_level(activity_level);
        Ok(truncate_calories(range.midpoint() * multiplier))
    }
}

/// Daily calories using the process-wide tables
pub fn estimate_daily_calories(
    weight_lbs: f64,
    activity_level: ActivityLevel,
) -> FeedingResult<u32> {
    FeedingTables::global().estimate_daily_calories(weight_lbs, activity_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(weight: f64) -> (u32, u32) {
        let r = FeedingTables::default().calorie_range(weight).unwrap();
        (r.min, r.max)
    }

    fn calories(weight: f64, level: ActivityLevel) -> u32 {
        FeedingTables::default()
            .estimate_daily_calories(weight, level)
            .unwrap()
    }

    #[test]
    fn test_small_weights_use_first_bracket() {
        for weight in [0.1, 1.0, 3.0, 4.99, 5.0] {
            assert_eq!(range(weight), (185, 200));
        }
        assert_eq!(calories(1.0, ActivityLevel::Moderate), 192);
        assert_eq!(calories(5.0, ActivityLevel::Low), 163);
    }

    #[test]
    fn test_weight_rounds_up_to_next_calibration_point() {
        assert_eq!(range(10.0), (300, 350));
        assert_eq!(range(25.0), (625, 695));
        assert_eq!(range(26.0), (700, 800));
        assert_eq!(range(30.0), (700, 800));
        assert_eq!(range(30.5), (875, 1000));
        assert_eq!(range(99.0), (1750, 2000));
    }

    #[test]
    fn test_extrapolation_counts_full_steps_only() {
        assert_eq!(range(100.0), (1750, 2000));
        assert_eq!(range(105.0), (1750, 2000));
        assert_eq!(range(110.0), (1790, 2050));
        assert_eq!(range(115.0), (1790, 2050));
        assert_eq!(range(150.0), (1950, 2250));
    }

    #[test]
    fn test_activity_multiplier_truncates() {
        assert_eq!(calories(10.0, ActivityLevel::Moderate), 325);
        assert_eq!(calories(10.0, ActivityLevel::Low), 276);
        assert_eq!(calories(10.0, ActivityLevel::High), 373);
        assert_eq!(calories(50.0, ActivityLevel::High), 1293);
        assert_eq!(calories(105.0, ActivityLevel::Moderate), 1875);
        assert_eq!(calories(115.0, ActivityLevel::Moderate), 1920);
    }

    #[test]
    fn test_heavy_dogs_are_monotonic() {
        let mut previous = 0;
        let mut w = 100.0;
        while w <= 200.0 {
            let current = calories(w, ActivityLevel::Moderate);
            assert!(current >= previous, "{} lbs dropped to {}", w, current);
            previous = current;
            w += 0.5;
        }
        let moderate = |w| calories(w, ActivityLevel::Moderate);
        assert_eq!(moderate(119.5), moderate(110.0));
        assert!(moderate(120.0) > moderate(119.5));
    }

    #[test]
    fn test_huge_weights_are_rejected_not_wrapped() {
        assert_eq!(range(10_000.0), (41_350, 51_500));

        let tables = FeedingTables::default();
        for weight in [1.0e9, 1.0e300, f64::MAX] {
            assert!(matches!(
                tables.estimate_daily_calories(weight, ActivityLevel::Moderate),
                Err(FeedingError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let tables = FeedingTables::default();
        assert!(matches!(
            tables.estimate_daily_calories(0.0, ActivityLevel::Moderate),
            Err(FeedingError::InvalidInput(_))
        ));
        assert!(tables.calorie_range(-10.0).is_err());
    }

    #[test]
    fn test_empty_chart_is_a_config_error() {
        let mut tables = FeedingTables::default();
        tables.calorie_chart.clear();
        assert!(matches!(tables.calorie_range(10.0), Err(FeedingError::Config(_))));
    }
}
