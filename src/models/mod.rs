//! Data models
//!
//! Inputs the planner consumes: the dog, products, and meal bundles.

mod bundle;
mod dog;
mod product;

#[cfg(test)]
pub(crate) use bundle::fixtures;
pub use bundle::MealBundle;
pub use dog::{validate_weight, ActivityLevel, DogProfile, LifeStage, SizeCategory};
pub use product::{PreferenceTag, Product, ProductRole};
