// crates/dinedb-core/src/model/mod.rs
pub mod index;
pub mod ingredient;
pub mod restaurant;
pub mod search;

pub use index::RestaurantIndex;
pub use ingredient::{BrandSummary, IngredientIndex, IngredientRecord};
pub use restaurant::{Dataset, Restaurant};
