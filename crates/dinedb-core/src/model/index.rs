// crates/dinedb-core/src/model/index.rs
use super::restaurant::{normalize_row, Dataset, Restaurant, SearchKey};
use crate::gazetteer::Gazetteer;
use crate::loader::{decode_table, RawRow};
use crate::text::sort_han;
use std::collections::BTreeSet;

/// In-memory restaurant collection with precomputed search keys.
///
/// Built once from decoded rows and never mutated afterwards, so shared
/// references can be handed to any number of readers without locking.
#[derive(Debug, Clone)]
pub struct RestaurantIndex {
    pub(crate) dataset: Dataset,
    pub(crate) records: Vec<Restaurant>,
    /// Parallel to `records`.
    pub(crate) keys: Vec<SearchKey>,
    pub(crate) action_labels: Vec<String>,
}

impl RestaurantIndex {
    /// Normalize rows into an index. Rows without a name are dropped.
    pub fn from_rows<'a, I>(rows: I, dataset: Dataset, gazetteer: Option<&Gazetteer>) -> Self
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        let records: Vec<Restaurant> = rows
            .into_iter()
            .filter_map(|row| normalize_row(row, dataset, gazetteer))
            .collect();
        Self::from_records(records, dataset)
    }

    /// Decode CSV text and build the index in one pass.
    pub fn from_csv(content: &str, dataset: Dataset, gazetteer: Option<&Gazetteer>) -> Self {
        let rows = decode_table(content);
        let index = Self::from_rows(&rows, dataset, gazetteer);
        tracing::debug!(
            %dataset,
            rows = rows.len(),
            kept = index.records.len(),
            "restaurant index built"
        );
        index
    }

    pub fn from_records(records: Vec<Restaurant>, dataset: Dataset) -> Self {
        let keys = records.iter().map(SearchKey::of).collect();

        let labels: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.eco_actions.iter().map(String::as_str))
            .collect();
        let mut action_labels: Vec<String> = labels.into_iter().map(str::to_string).collect();
        sort_han(&mut action_labels);

        Self {
            dataset,
            records,
            keys,
            action_labels,
        }
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
