//! Feeding engine
//!
//! Pure pipeline from a dog's weight to a priced shopping list:
//! calories -> daily portions -> supply projection -> packages.
//! Every function reads only its arguments and the immutable
//! [`FeedingTables`], so all of it is safe to call from any thread.

pub mod calories;
pub mod error;
pub mod packages;
pub mod portions;
pub mod supply;
pub mod tables;

pub use calories::{estimate_daily_calories, CalorieRange};
pub use error::{FeedingError, FeedingResult};
pub use packages::{
    package_quantity, rank_bundles, recommend_package_sizes, BundleFailure, PackageLine,
    RankedBundles, ShoppingList,
};
pub use portions::{calculate_portions, PortionResult};
pub use supply::{calculate_45_day_supply, SupplyProjection};
pub use tables::{
    ActivityMultipliers, CalorieBracket, CalorieDensities, CalorieRatios, Extrapolation,
    FeedingTables, LifeStageMultipliers, TABLES_PATH_ENV,
};
