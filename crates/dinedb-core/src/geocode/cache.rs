// crates/dinedb-core/src/geocode/cache.rs
use super::GeocodeResult;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

/// Append-only memo of successful geocodes, keyed by trimmed address.
///
/// Unbounded by default: entries live for the rest of the process. With
/// `max_entries` set, the oldest insertion is evicted once the bound is hit.
/// Safe to share between concurrent resolvers; a lookup never blocks on a
/// network call.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    inner: RwLock<Entries>,
    max_entries: Option<usize>,
}

#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, Arc<GeocodeResult>>,
    order: VecDeque<String>,
}

impl GeocodeCache {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(max_entries: usize) -> Self {
        Self {
            inner: RwLock::default(),
            max_entries: Some(max_entries.max(1)),
        }
    }

    pub fn with_limit(max_entries: Option<usize>) -> Self {
        max_entries.map_or_else(Self::unbounded, Self::bounded)
    }

    pub fn get(&self, key: &str) -> Option<Arc<GeocodeResult>> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries.map.get(key).cloned()
    }

    /// Stores `value` unless another caller got there first, in which case the
    /// earlier entry is kept and returned.
    pub fn insert(&self, key: String, value: GeocodeResult) -> Arc<GeocodeResult> {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.map.get(&key) {
            return Arc::clone(existing);
        }

        if let Some(max) = self.max_entries {
            while entries.map.len() >= max {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.map.remove(&oldest);
            }
        }

        let value = Arc::new(value);
        entries.order.push_back(key.clone());
        entries.map.insert(key, Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Provider;

    fn result(name: &str) -> GeocodeResult {
        GeocodeResult {
            lat: 25.0,
            lng: 121.5,
            display_name: name.to_string(),
            kind: None,
            source: Provider::Nominatim,
        }
    }

    #[test]
    fn first_insert_wins() {
        let cache = GeocodeCache::unbounded();
        let a = cache.insert("k".into(), result("first"));
        let b = cache.insert("k".into(), result("second"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.get("k").unwrap().display_name, "first");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn bounded_cache_evicts_oldest() {
        let cache = GeocodeCache::bounded(2);
        cache.insert("a".into(), result("a"));
        cache.insert("b".into(), result("b"));
        cache.insert("c".into(), result("c"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn concurrent_inserts_for_different_keys() {
        let cache = Arc::new(GeocodeCache::unbounded());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        cache.insert(format!("{i}-{j}"), result("x"));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 400);
    }
}
