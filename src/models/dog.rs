//! Dog profile model
//!
//! The per-call description of the dog being fed, plus the classification
//! rules callers use to pick candidate meal bundles.

use serde::{Deserialize, Serialize};

use crate::feeding::{FeedingError, FeedingResult};

/// Activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::High => "high",
        }
    }

    /// Strict parse; unknown values are an error
    pub fn parse(s: &str) -> FeedingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            other => Err(FeedingError::InvalidEnum {
                field: "activity_level",
                value: other.to_string(),
            }),
        }
    }

    /// Lenient parse; unknown values fall back to moderate
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|e| {
            tracing::warn!("{}, using moderate", e);
            ActivityLevel::Moderate
        })
    }
}

/// Life stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LifeStage {
    Puppy,
    #[default]
    Adult,
    Senior,
}

impl LifeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeStage::Puppy => "puppy",
            LifeStage::Adult => "adult",
            LifeStage::Senior => "senior",
        }
    }

    /// Strict parse; unknown values are an error
    pub fn parse(s: &str) -> FeedingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "puppy" => Ok(LifeStage::Puppy),
            "adult" => Ok(LifeStage::Adult),
            "senior" => Ok(LifeStage::Senior),
            other => Err(FeedingError::InvalidEnum {
                field: "life_stage",
                value: other.to_string(),
            }),
        }
    }

    /// Lenient parse; unknown values get no stage adjustment (adult)
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|e| {
            tracing::warn!("{}, using adult", e);
            LifeStage::Adult
        })
    }

    /// Bucket an age in months: under 1 year is a puppy, 8 years and up is a senior
    pub fn for_age_months(age_months: u32) -> Self {
        if age_months < 12 {
            LifeStage::Puppy
        } else if age_months < 96 {
            LifeStage::Adult
        } else {
            LifeStage::Senior
        }
    }
}

/// Size category a meal bundle is curated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }

    pub fn parse(s: &str) -> FeedingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(SizeCategory::Small),
            "medium" => Ok(SizeCategory::Medium),
            "large" => Ok(SizeCategory::Large),
            other => Err(FeedingError::InvalidEnum {
                field: "size_category",
                value: other.to_string(),
            }),
        }
    }

    /// Up to 25 lbs is small, up to 60 lbs is medium
    pub fn for_weight(weight_lbs: f64) -> Self {
        if weight_lbs <= 25.0 {
            SizeCategory::Small
        } else if weight_lbs <= 60.0 {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }
}

/// The dog a plan is computed for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DogProfile {
    pub weight_lbs: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub life_stage: LifeStage,
}

impl DogProfile {
    /// Build a profile, rejecting weights that are not positive
    pub fn new(
        weight_lbs: f64,
        activity_level: ActivityLevel,
        life_stage: LifeStage,
    ) -> FeedingResult<Self> {
        validate_weight(weight_lbs)?;
        Ok(Self {
            weight_lbs,
            activity_level,
            life_stage,
        })
    }

    /// Build a profile from an age in months instead of a life stage
    pub fn from_age(
        weight_lbs: f64,
        age_months: u32,
        activity_level: ActivityLevel,
    ) -> FeedingResult<Self> {
        Self::new(weight_lbs, activity_level, LifeStage::for_age_months(age_months))
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::for_weight(self.weight_lbs)
    }
}

/// Weight must be a positive, finite number of pounds
pub fn validate_weight(weight_lbs: f64) -> FeedingResult<()> {
    if !weight_lbs.is_finite() || weight_lbs <= 0.0 {
        return Err(FeedingError::InvalidInput(format!(
            "weight must be a positive number of pounds, got {}",
            weight_lbs
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_parsing() {
        assert_eq!(ActivityLevel::parse("HIGH").unwrap(), ActivityLevel::High);
        assert!(ActivityLevel::parse("couch").is_err());
        assert_eq!(ActivityLevel::from_str("couch"), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_str("low"), ActivityLevel::Low);
    }

    #[test]
    fn test_life_stage_parsing() {
        assert_eq!(LifeStage::parse(" senior ").unwrap(), LifeStage::Senior);
        assert_eq!(LifeStage::from_str("elderly"), LifeStage::Adult);
    }

    #[test]
    fn test_life_stage_for_age() {
        assert_eq!(LifeStage::for_age_months(4), LifeStage::Puppy);
        assert_eq!(LifeStage::for_age_months(11), LifeStage::Puppy);
        assert_eq!(LifeStage::for_age_months(12), LifeStage::Adult);
        assert_eq!(LifeStage::for_age_months(95), LifeStage::Adult);
        assert_eq!(LifeStage::for_age_months(96), LifeStage::Senior);
    }

    #[test]
    fn test_size_category_for_weight() {
        assert_eq!(SizeCategory::for_weight(5.0), SizeCategory::Small);
        assert_eq!(SizeCategory::for_weight(25.0), SizeCategory::Small);
        assert_eq!(SizeCategory::for_weight(26.0), SizeCategory::Medium);
        assert_eq!(SizeCategory::for_weight(60.0), SizeCategory::Medium);
        assert_eq!(SizeCategory::for_weight(61.0), SizeCategory::Large);
    }

    #[test]
    fn test_classification_strings_match_enum_serde() {
        for stage in [LifeStage::Puppy, LifeStage::Adult, LifeStage::Senior] {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
        for size in [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Large] {
            assert_eq!(SizeCategory::parse(size.as_str()).unwrap(), size);
        }
    }

    #[test]
    fn test_profile_rejects_bad_weight() {
        assert!(matches!(
            DogProfile::new(0.0, ActivityLevel::Moderate, LifeStage::Adult),
            Err(FeedingError::InvalidInput(_))
        ));
        assert!(DogProfile::new(-3.0, ActivityLevel::Moderate, LifeStage::Adult).is_err());
        assert!(DogProfile::new(f64::NAN, ActivityLevel::Moderate, LifeStage::Adult).is_err());
    }

    #[test]
    fn test_profile_from_age() {
        let dog = DogProfile::from_age(45.0, 100, ActivityLevel::Low).unwrap();
        assert_eq!(dog.life_stage, LifeStage::Senior);
        assert_eq!(dog.size_category(), SizeCategory::Medium);
    }
}
