//! Feeding constant tables
//!
//! Calorie chart, multipliers, ratios and densities. Loaded once at startup
//! (optionally from a JSON file) and immutable afterwards.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::{FeedingError, FeedingResult};
use crate::models::{ActivityLevel, LifeStage};

/// Environment variable pointing at a JSON tables override
pub const TABLES_PATH_ENV: &str = "CHOWPLAN_TABLES_PATH";

/// One calibration point of the calorie chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieBracket {
    pub weight_lbs: f64,
    pub min_calories: u32,
    pub max_calories: u32,
}

impl CalorieBracket {
    const fn new(weight_lbs: f64, min_calories: u32, max_calories: u32) -> Self {
        Self {
            weight_lbs,
            min_calories,
            max_calories,
        }
    }
}

/// How the chart grows past its heaviest calibration point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrapolation {
    /// Only full steps count (105 lbs adds nothing over 100)
    pub step_lbs: f64,
    pub min_per_step: u32,
    pub max_per_step: u32,
}

impl Default for Extrapolation {
    fn default() -> Self {
        Self {
            step_lbs: 10.0,
            min_per_step: 40,
            max_per_step: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityMultipliers {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl ActivityMultipliers {
    pub fn for_level(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Low => self.low,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::High => self.high,
        }
    }
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        Self {
            low: 0.85,
            moderate: 1.0,
            high: 1.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeStageMultipliers {
    pub puppy: f64,
    pub adult: f64,
    pub senior: f64,
}

impl LifeStageMultipliers {
    pub fn for_stage(&self, stage: LifeStage) -> f64 {
        match stage {
            LifeStage::Puppy => self.puppy,
            LifeStage::Adult => self.adult,
            LifeStage::Senior => self.senior,
        }
    }
}

impl Default for LifeStageMultipliers {
    fn default() -> Self {
        Self {
            puppy: 1.10,
            adult: 1.0,
            senior: 0.90,
        }
    }
}

/// Share of daily calories assigned to each food type
///
/// Treats sit on top of the wet/dry split, so the shares add up to 110%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieRatios {
    pub wet: f64,
    pub dry: f64,
    pub treat: f64,
}

impl Default for CalorieRatios {
    fn default() -> Self {
        Self {
            wet: 0.25,
            dry: 0.75,
            treat: 0.10,
        }
    }
}

/// Calories per ounce of each food type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieDensities {
    pub wet_per_oz: f64,
    pub dry_per_oz: f64,
    /// ~1400 cal per 16 oz bag
    pub treat_per_oz: f64,
}

impl Default for CalorieDensities {
    fn default() -> Self {
        Self {
            wet_per_oz: 25.0,
            dry_per_oz: 95.0,
            treat_per_oz: 87.5,
        }
    }
}

/// All constants the feeding engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedingTables {
    /// Sorted by strictly ascending weight
    pub calorie_chart: Vec<CalorieBracket>,
    pub extrapolation: Extrapolation,
    pub activity_multipliers: ActivityMultipliers,
    pub life_stage_multipliers: LifeStageMultipliers,
    pub ratios: CalorieRatios,
    pub densities: CalorieDensities,
    /// Dry food ounces per measuring cup
    pub oz_per_cup: f64,
    /// Planning horizon for supply projections
    pub supply_days: u32,
}

impl Default for FeedingTables {
    fn default() -> Self {
        Self {
            calorie_chart: vec![
                CalorieBracket::new(5.0, 185, 200),
                CalorieBracket::new(10.0, 300, 350),
                CalorieBracket::new(15.0, 415, 475),
                CalorieBracket::new(20.0, 515, 585),
                CalorieBracket::new(25.0, 625, 695),
                CalorieBracket::new(30.0, 700, 800),
                CalorieBracket::new(40.0, 875, 1000),
                CalorieBracket::new(50.0, 1050, 1200),
                CalorieBracket::new(60.0, 1200, 1350),
                CalorieBracket::new(70.0, 1350, 1500),
                CalorieBracket::new(80.0, 1500, 1650),
                CalorieBracket::new(90.0, 1600, 1800),
                CalorieBracket::new(100.0, 1750, 2000),
            ],
            extrapolation: Extrapolation::default(),
            activity_multipliers: ActivityMultipliers::default(),
            life_stage_multipliers: LifeStageMultipliers::default(),
            ratios: CalorieRatios::default(),
            densities: CalorieDensities::default(),
            oz_per_cup: 4.0,
            supply_days: 45,
        }
    }
}

/// Process-wide tables, set once at startup
static FEEDING_TABLES: OnceLock<FeedingTables> = OnceLock::new();
static TABLES_SOURCE: OnceLock<String> = OnceLock::new();

impl FeedingTables {
    /// Get the installed tables, falling back to the built-in defaults
    pub fn global() -> &'static Self {
        FEEDING_TABLES.get_or_init(Self::default)
    }

    /// Where the installed tables came from ("defaults" or a file path)
    pub fn global_source() -> &'static str {
        TABLES_SOURCE.get().map(String::as_str).unwrap_or("defaults")
    }

    /// Install tables for the whole process
    ///
    /// Fails if tables were already installed or read by a calculation.
    pub fn install(self, source: impl Into<String>) -> FeedingResult<&'static Self> {
        self.validate()?;
        FEEDING_TABLES
            .set(self)
            .map_err(|_| FeedingError::Config("feeding tables already initialised".into()))?;
        let _ = TABLES_SOURCE.set(source.into());
        Ok(Self::global())
    }

    /// Load and validate tables from a JSON file; missing fields take defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> FeedingResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let tables: FeedingTables = serde_json::from_str(&raw)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables named by `CHOWPLAN_TABLES_PATH`, if set
    pub fn load_from_env() -> FeedingResult<Option<(Self, String)>> {
        match std::env::var(TABLES_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let tables = Self::load_from_path(&path)?;
                Ok(Some((tables, path)))
            }
            _ => Ok(None),
        }
    }

    /// Check the tables are internally consistent
    pub fn validate(&self) -> FeedingResult<()> {
        if self.calorie_chart.is_empty() {
            return Err(FeedingError::Config("calorie chart is empty".into()));
        }

        for pair in self.calorie_chart.windows(2) {
            if pair[0].weight_lbs >= pair[1].weight_lbs {
                return Err(FeedingError::Config(format!(
                    "calorie chart weights must be strictly ascending ({} then {})",
                    pair[0].weight_lbs, pair[1].weight_lbs
                )));
            }
        }

        for bracket in &self.calorie_chart {
            if !(bracket.weight_lbs > 0.0) || bracket.min_calories > bracket.max_calories {
                return Err(FeedingError::Config(format!(
                    "invalid calorie bracket at {} lbs",
                    bracket.weight_lbs
                )));
            }
        }

        if !(self.extrapolation.step_lbs > 0.0) {
            return Err(FeedingError::Config("extrapolation step must be positive".into()));
        }

        let densities = [
            self.densities.wet_per_oz,
            self.densities.dry_per_oz,
            self.densities.treat_per_oz,
            self.oz_per_cup,
        ];
        if densities.iter().any(|d| !(*d > 0.0)) {
            return Err(FeedingError::Config(
                "calorie densities and ounces per cup must be positive".into(),
            ));
        }

        let multipliers = [
            self.activity_multipliers.low,
            self.activity_multipliers.moderate,
            self.activity_multipliers.high,
            self.life_stage_multipliers.puppy,
            self.life_stage_multipliers.adult,
            self.life_stage_multipliers.senior,
            self.ratios.wet,
            self.ratios.dry,
            self.ratios.treat,
        ];
        if multipliers.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(FeedingError::Config(
                "multipliers and ratios must be non-negative".into(),
            ));
        }

        if self.supply_days == 0 {
            return Err(FeedingError::Config("supply horizon must be at least one day".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tables = FeedingTables::default();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.calorie_chart.len(), 13);
        assert_eq!(tables.supply_days, 45);
    }

    #[test]
    fn test_multiplier_lookup() {
        let tables = FeedingTables::default();
        assert_eq!(tables.activity_multipliers.for_level(ActivityLevel::Low), 0.85);
        assert_eq!(tables.activity_multipliers.for_level(ActivityLevel::High), 1.15);
        assert_eq!(tables.life_stage_multipliers.for_stage(LifeStage::Senior), 0.90);
        assert_eq!(tables.life_stage_multipliers.for_stage(LifeStage::Adult), 1.0);
    }

    #[test]
    fn test_validate_rejects_unsorted_chart() {
        let mut tables = FeedingTables::default();
        tables.calorie_chart.swap(0, 1);
        assert!(matches!(tables.validate(), Err(FeedingError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_chart_and_zero_density() {
        let mut tables = FeedingTables::default();
        tables.calorie_chart.clear();
        assert!(tables.validate().is_err());

        let mut tables = FeedingTables::default();
        tables.densities.dry_per_oz = 0.0;
        assert!(tables.validate().is_err());

        let mut tables = FeedingTables::default();
        tables.supply_days = 0;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let json = r#"{"supply_days": 30, "ratios": {"wet": 0.5, "dry": 0.5, "treat": 0.05}}"#;
        let tables: FeedingTables = serde_json::from_str(json).unwrap();
        assert_eq!(tables.supply_days, 30);
        assert_eq!(tables.ratios.wet, 0.5);
        assert_eq!(tables.calorie_chart, FeedingTables::default().calorie_chart);
        assert_eq!(tables.oz_per_cup, 4.0);
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir()
            .join(format!("chowplan-tables-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"oz_per_cup": 3.5}"#).unwrap();
        let tables = FeedingTables::load_from_path(&path).unwrap();
        assert_eq!(tables.oz_per_cup, 3.5);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            FeedingTables::load_from_path(&path),
            Err(FeedingError::Io(_))
        ));
    }
}
