//! Meal bundle model
//!
//! A curated dry + wet + treat combination sold as one meal plan.

use serde::{Deserialize, Serialize};

use crate::feeding::FeedingResult;
use super::{LifeStage, PreferenceTag, Product, ProductRole, SizeCategory};

/// A pre-curated meal combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealBundle {
    pub id: i64,
    pub name: String,
    pub brand: String,
    pub dry_food: Product,
    pub wet_food: Product,
    pub treats: Product,
    /// Target dog size; informational to the engine
    pub size_category: SizeCategory,
    /// Target life stage; informational to the engine
    pub life_stage: LifeStage,
    #[serde(default)]
    pub preference_tags: Vec<PreferenceTag>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl MealBundle {
    /// The product filling the given role
    pub fn product(&self, role: ProductRole) -> &Product {
        match role {
            ProductRole::Dry => &self.dry_food,
            ProductRole::Wet => &self.wet_food,
            ProductRole::Treat => &self.treats,
        }
    }

    /// Check every slot holds a usable product of the right role
    pub fn validate(&self) -> FeedingResult<()> {
        for role in ProductRole::ALL {
            self.product(role).validate_for(role)?;
        }
        Ok(())
    }

    /// Case-insensitive substring match against the bundle's tags, so
    /// "grain" finds grain_free; blank matches everything
    pub fn has_preference(&self, preference: &str) -> bool {
        let wanted = preference.trim().to_lowercase().replace(['-', ' '], "_");
        wanted.is_empty()
            || self
                .preference_tags
                .iter()
                .any(|tag| tag.as_str().contains(wanted.as_str()))
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.brand, self.name)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::nutrition::PackageUnit;

    pub fn product(
        id: i64,
        role: ProductRole,
        size: f64,
        unit: PackageUnit,
        price: f64,
    ) -> Product {
        Product {
            id,
            brand: "Acme".into(),
            name: format!("{} #{}", role.as_str(), id),
            role,
            package_size: size,
            package_unit: unit,
            price,
            calories_per_oz: None,
            preference: None,
        }
    }

    /// Bundle with pound-sized packages: dry 4 lb, wet 6 lb, treat 1 lb
    pub fn bundle(id: i64, dry_price: f64, wet_price: f64, treat_price: f64) -> MealBundle {
        MealBundle {
            id,
            name: format!("Bundle {}", id),
            brand: "Acme".into(),
            dry_food: product(id * 10 + 1, ProductRole::Dry, 4.0, PackageUnit::Lb, dry_price),
            wet_food: product(id * 10 + 2, ProductRole::Wet, 6.0, PackageUnit::Lb, wet_price),
            treats: product(id * 10 + 3, ProductRole::Treat, 1.0, PackageUnit::Lb, treat_price),
            size_category: SizeCategory::Medium,
            life_stage: LifeStage::Adult,
            preference_tags: Vec::new(),
            is_active: true,
        }
    }
}
