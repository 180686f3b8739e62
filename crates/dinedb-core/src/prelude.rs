//! dinedb prelude: common types and traits for demos and downstream tools.

pub use crate::config::{DataPaths, Settings};
pub use crate::error::{DineError, FailureKind, GeocodeError, Provider, Result};
pub use crate::geocode::{GeocodeResolver, GeocodeResult};
pub use crate::loader::Catalog;
pub use crate::model::{Dataset, IngredientIndex, Restaurant, RestaurantIndex};
pub use crate::text::fold_key;
pub use crate::traits::{RestaurantSearch, DEFAULT_SUGGEST_LIMIT};
