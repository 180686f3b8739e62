// crates/dinedb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (file I/O, optional gzip) and hands the text to
//! the tabular decoder. All datasets are ingested eagerly, once, before any
//! index is exposed.

use crate::config::DataPaths;
use crate::error::Result;
use crate::gazetteer::Gazetteer;
use crate::model::{Dataset, IngredientIndex, RestaurantIndex};
use once_cell::sync::OnceCell;
use std::path::Path;

mod common_io;
mod decode;

pub use common_io::{open_stream, read_source};
pub use decode::{decode_table, split_line, RawRow};

static CATALOG: OnceCell<Catalog> = OnceCell::new();

/// Every loaded dataset, fixed at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub eco_friendly: RestaurantIndex,
    pub safety: RestaurantIndex,
    pub ingredients: IngredientIndex,
    pub gazetteer: Gazetteer,
}

impl Catalog {
    /// Load every configured dataset. Absent paths yield empty indexes.
    ///
    /// The gazetteer is read first since the safety dataset needs it for
    /// region tagging.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let gazetteer = match &paths.gazetteer {
            Some(p) => Gazetteer::from_csv(&read_source(p)?),
            None => Gazetteer::default(),
        };

        let eco_friendly = load_restaurants(paths.eco_friendly.as_deref(), Dataset::EcoFriendly, None)?;
        let safety = load_restaurants(paths.safety.as_deref(), Dataset::Safety, Some(&gazetteer))?;
        let ingredients = match &paths.ingredients {
            Some(p) => IngredientIndex::from_csv(&read_source(p)?),
            None => IngredientIndex::default(),
        };

        tracing::info!(
            eco_friendly = eco_friendly.len(),
            safety = safety.len(),
            ingredients = ingredients.len(),
            divisions = gazetteer.len(),
            "catalog loaded"
        );

        Ok(Self {
            eco_friendly,
            safety,
            ingredients,
            gazetteer,
        })
    }

    /// Process-wide catalog, loaded on first call.
    ///
    /// Later calls return the same instance and ignore `paths`. A failed
    /// load is not memoized.
    pub fn global(paths: &DataPaths) -> Result<&'static Catalog> {
        CATALOG.get_or_try_init(|| Self::load(paths))
    }

    pub fn restaurants(&self, dataset: Dataset) -> &RestaurantIndex {
        match dataset {
            Dataset::EcoFriendly => &self.eco_friendly,
            Dataset::Safety => &self.safety,
        }
    }
}

fn load_restaurants(path: Option<&Path>, dataset: Dataset, gazetteer: Option<&Gazetteer>) -> Result<RestaurantIndex> {
    match path {
        Some(p) => Ok(RestaurantIndex::from_csv(&read_source(p)?, dataset, gazetteer)),
        None => Ok(RestaurantIndex::from_records(Vec::new(), dataset)),
    }
}
