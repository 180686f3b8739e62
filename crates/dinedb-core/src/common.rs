/// Simple aggregate statistics for a restaurant index.
///
/// Returned by [`crate::RestaurantSearch::stats`], these counts reflect the
/// materialized in-memory collection after nameless rows were dropped.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub records: usize,
    /// Records tagged with at least a county.
    pub with_region: usize,
    pub action_labels: usize,
}
