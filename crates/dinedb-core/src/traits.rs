// crates/dinedb-core/src/traits.rs
use crate::common::IndexStats;
use crate::model::Restaurant;

/// Default number of suggestions returned by [`RestaurantSearch::suggest`].
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

/// Read-only query surface over a loaded restaurant collection.
///
/// Every operation folds its input with [`crate::text::fold_key`], the same
/// function used when the collection was built, and returns records in
/// ingestion order. An input that folds to the empty string never matches
/// anything.
pub trait RestaurantSearch {
    fn stats(&self) -> IndexStats;

    /// Returns every record in source order.
    ///
    /// # Example
    ///
    /// ```
    /// use dinedb_core::{Dataset, RestaurantIndex, RestaurantSearch};
    ///
    /// let idx = RestaurantIndex::from_csv("name,address\nA,X\nB,Y\n", Dataset::EcoFriendly, None);
    /// let names: Vec<_> = idx.list_all().iter().map(|r| r.name()).collect();
    /// assert_eq!(names, ["A", "B"]);
    /// ```
    fn list_all(&self) -> &[Restaurant];

    /// Records whose folded name or address contains the folded keyword.
    ///
    /// # Example
    ///
    /// ```
    /// use dinedb_core::{Dataset, RestaurantIndex, RestaurantSearch};
    ///
    /// let csv = "name,address\nGreen Bowl,臺北市大安區\nBlue Cup,新北市板橋區\n";
    /// let idx = RestaurantIndex::from_csv(csv, Dataset::EcoFriendly, None);
    /// assert_eq!(idx.search("green bowl").len(), 1);
    /// assert_eq!(idx.search("板橋").len(), 1);
    /// assert!(idx.search("  ").is_empty());
    /// ```
    fn search(&self, keyword: &str) -> Vec<&Restaurant>;

    /// Name-only substring matches, truncated to `limit`.
    fn suggest(&self, keyword: &str, limit: usize) -> Vec<&Restaurant>;

    /// First record whose folded name equals the folded input.
    fn find_by_exact_name(&self, name: &str) -> Option<&Restaurant>;

    /// All eco action labels, deduplicated and sorted for Traditional Chinese.
    fn distinct_action_labels(&self) -> &[String];
}
