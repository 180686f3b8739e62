// crates/dinedb-core/src/model/search.rs
use super::index::RestaurantIndex;
use super::restaurant::Restaurant;
use crate::common::IndexStats;
use crate::text::fold_key;
use crate::traits::RestaurantSearch;

impl RestaurantSearch for RestaurantIndex {
    fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.records.len(),
            with_region: self.records.iter().filter(|r| r.county.is_some()).count(),
            action_labels: self.action_labels.len(),
        }
    }

    fn list_all(&self) -> &[Restaurant] {
        &self.records
    }

    fn search(&self, keyword: &str) -> Vec<&Restaurant> {
        let q = fold_key(keyword);
        if q.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .zip(&self.keys)
            .filter(|(_, k)| k.name.contains(&q) || k.address.contains(&q))
            .map(|(r, _)| r)
            .collect()
    }

    fn suggest(&self, keyword: &str, limit: usize) -> Vec<&Restaurant> {
        let q = fold_key(keyword);
        if q.is_empty() {
            return Vec::new();
        }

        self.records
            .iter()
            .zip(&self.keys)
            .filter(|(_, k)| k.name.contains(&q))
            .map(|(r, _)| r)
            .take(limit)
            .collect()
    }

    fn find_by_exact_name(&self, name: &str) -> Option<&Restaurant> {
        let q = fold_key(name);
        if q.is_empty() {
            return None;
        }

        self.keys
            .iter()
            .position(|k| k.name == q)
            .map(|i| &self.records[i])
    }

    fn distinct_action_labels(&self) -> &[String] {
        &self.action_labels
    }
}
