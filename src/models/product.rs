//! Product model
//!
//! A purchasable package of dry food, wet food, or treats.

use serde::{Deserialize, Serialize};

use crate::feeding::{FeedingError, FeedingResult};
use crate::nutrition::{to_lbs, PackageUnit};

/// Role a product plays inside a meal bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductRole {
    Dry,
    Wet,
    Treat,
}

impl ProductRole {
    pub const ALL: [ProductRole; 3] = [ProductRole::Dry, ProductRole::Wet, ProductRole::Treat];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductRole::Dry => "dry",
            ProductRole::Wet => "wet",
            ProductRole::Treat => "treat",
        }
    }

    pub fn parse(s: &str) -> FeedingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Ok(ProductRole::Dry),
            "wet" => Ok(ProductRole::Wet),
            "treat" | "treats" => Ok(ProductRole::Treat),
            other => Err(FeedingError::InvalidEnum {
                field: "product_role",
                value: other.to_string(),
            }),
        }
    }
}

/// Shopping preference a product or bundle is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceTag {
    Budget,
    Premium,
    GrainFree,
    Organic,
    Natural,
    LimitedIngredient,
}

impl PreferenceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceTag::Budget => "budget",
            PreferenceTag::Premium => "premium",
            PreferenceTag::GrainFree => "grain_free",
            PreferenceTag::Organic => "organic",
            PreferenceTag::Natural => "natural",
            PreferenceTag::LimitedIngredient => "limited_ingredient",
        }
    }

    pub fn parse(s: &str) -> FeedingResult<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "budget" => Ok(PreferenceTag::Budget),
            "premium" => Ok(PreferenceTag::Premium),
            "grain_free" => Ok(PreferenceTag::GrainFree),
            "organic" => Ok(PreferenceTag::Organic),
            "natural" => Ok(PreferenceTag::Natural),
            "limited_ingredient" => Ok(PreferenceTag::LimitedIngredient),
            other => Err(FeedingError::InvalidEnum {
                field: "preference",
                value: other.to_string(),
            }),
        }
    }
}

/// A product with package size and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub brand: String,
    pub name: String,
    pub role: ProductRole,
    pub package_size: f64,
    #[serde(default)]
    pub package_unit: PackageUnit,
    pub price: f64,
    #[serde(default)]
    pub calories_per_oz: Option<f64>,
    #[serde(default)]
    pub preference: Option<PreferenceTag>,
}

impl Product {
    /// Package size in pounds, rejecting sizes that would break quantity math
    pub fn package_size_lbs(&self) -> FeedingResult<f64> {
        if !self.package_size.is_finite() || self.package_size <= 0.0 {
            return Err(self.invalid(format!(
                "package size must be positive, got {}",
                self.package_size
            )));
        }
        Ok(to_lbs(self.package_size, self.package_unit))
    }

    /// Check the product is usable in the given bundle slot
    pub fn validate_for(&self, role: ProductRole) -> FeedingResult<()> {
        if self.role != role {
            return Err(self.invalid(format!(
                "is a {} product in the {} slot",
                self.role.as_str(),
                role.as_str()
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(self.invalid(format!("price must be non-negative, got {}", self.price)));
        }
        self.package_size_lbs()?;
        Ok(())
    }

    fn invalid(&self, reason: String) -> FeedingError {
        FeedingError::InvalidProduct {
            product_id: self.id,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kibble(size: f64, unit: PackageUnit) -> Product {
        Product {
            id: 1,
            brand: "Acme".into(),
            name: "Chicken & Rice".into(),
            role: ProductRole::Dry,
            package_size: size,
            package_unit: unit,
            price: 42.99,
            calories_per_oz: None,
            preference: None,
        }
    }

    #[test]
    fn test_package_size_lbs_converts_units() {
        assert_eq!(kibble(30.0, PackageUnit::Lb).package_size_lbs().unwrap(), 30.0);
        assert_eq!(kibble(8.0, PackageUnit::Oz).package_size_lbs().unwrap(), 0.5);
    }

    #[test]
    fn test_degenerate_package_size_is_rejected() {
        for size in [0.0, -4.0, f64::INFINITY] {
            let err = kibble(size, PackageUnit::Lb).package_size_lbs().unwrap_err();
            assert!(matches!(err, FeedingError::InvalidProduct { product_id: 1, .. }));
        }
    }

    #[test]
    fn test_validate_for_checks_role_and_price() {
        let product = kibble(30.0, PackageUnit::Lb);
        assert!(product.validate_for(ProductRole::Dry).is_ok());
        assert!(product.validate_for(ProductRole::Wet).is_err());

        let mut free = product.clone();
        free.price = 0.0;
        assert!(free.validate_for(ProductRole::Dry).is_ok());
        free.price = -1.0;
        assert!(free.validate_for(ProductRole::Dry).is_err());
    }

    #[test]
    fn test_preference_tag_parsing() {
        assert_eq!(PreferenceTag::parse("Grain-Free").unwrap(), PreferenceTag::GrainFree);
        assert_eq!(
            PreferenceTag::parse("limited ingredient").unwrap(),
            PreferenceTag::LimitedIngredient
        );
        assert!(PreferenceTag::parse("raw").is_err());
    }

    #[test]
    fn test_product_deserializes_with_defaults() {
        let json = r#"{"id": 7, "brand": "Acme", "name": "Stew", "role": "wet",
                       "package_size": 13.2, "package_unit": "oz", "price": 2.49}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.role, ProductRole::Wet);
        assert_eq!(product.package_unit, PackageUnit::Oz);
        assert_eq!(product.preference, None);
    }
}
