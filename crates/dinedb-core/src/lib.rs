// crates/dinedb-core/src/lib.rs

pub mod alias;
pub mod common;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod geocode;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod text;
pub mod tgos_data;
pub mod traits;

// Re-exports
pub use crate::common::IndexStats;
pub use crate::config::{DataPaths, GeocodeSettings, Settings};
pub use crate::error::{DineError, FailureKind, GeocodeError, Provider, Result};
pub use crate::gazetteer::{Division, Gazetteer, Region};
pub use crate::geocode::{GeocodeCache, GeocodeProvider, GeocodeResolver, GeocodeResult};
pub use crate::loader::Catalog;
pub use crate::model::{BrandSummary, Dataset, IngredientIndex, IngredientRecord, Restaurant, RestaurantIndex};
pub use crate::tgos_data::{AdministrativeTown, NearbyRestaurant};
// The search trait must be in scope for the query methods.
pub use crate::traits::{RestaurantSearch, DEFAULT_SUGGEST_LIMIT};

#[cfg(feature = "net")]
pub use crate::tgos_data::TgosDataClient;
