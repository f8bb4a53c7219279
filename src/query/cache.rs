use lru::LruCache;
use parking_lot::Mutex;
use serde::{Serialize, Deserialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::types::{EngineKind, MovieRef};
use crate::query::criteria::Criteria;

/// Result cache for repeated façade queries
pub struct QueryCache {
    pub cache: Mutex<LruCache<QueryKey, Vec<MovieRef>>>,
    pub size_limit: usize,
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct QueryKey {
    pub engine: EngineKind,
    pub criteria: Criteria,
    pub max_results: usize,
}

impl QueryCache {
    /// Returns `None` for a zero capacity, which means caching is disabled.
    pub fn new(size_limit: usize) -> Option<Self> {
        let cap = NonZeroUsize::new(size_limit)?;
        Some(QueryCache {
            cache: Mutex::new(LruCache::new(cap)),
            size_limit,
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        })
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<MovieRef>> {
        let mut cache = self.cache.lock();
        if let Some(results) = cache.get(key) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(results.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, key: QueryKey, results: Vec<MovieRef>) {
        self.cache.lock().put(key, results);
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.cache.lock().len(),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Movie, MovieId};

    fn key(genre: &str, max_results: usize) -> QueryKey {
        QueryKey {
            engine: EngineKind::Inverted,
            criteria: Criteria::new().genre(genre),
            max_results,
        }
    }

    #[test]
    fn zero_capacity_disables_cache() {
        assert!(QueryCache::new(0).is_none());
    }

    #[test]
    fn hits_and_misses_are_counted() {
        let cache = QueryCache::new(2).unwrap();
        let movie = Movie::new(MovieId(1), "Heat", ["Crime"], ["Michael Mann"], ["Al Pacino"], 8.3).into_ref();

        assert!(cache.get(&key("Crime", 10)).is_none());
        cache.put(key("Crime", 10), vec![movie.clone()]);

        let cached = cache.get(&key("Crime", 10)).unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id(), MovieId(1));
        // a different cap is a different query
        assert!(cache.get(&key("Crime", 5)).is_none());

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 2);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let cache = QueryCache::new(1).unwrap();
        cache.put(key("Crime", 10), Vec::new());
        cache.put(key("Drama", 10), Vec::new());
        assert!(cache.get(&key("Crime", 10)).is_none());
        assert!(cache.get(&key("Drama", 10)).is_some());
        cache.clear();
        assert_eq!(cache.stats().size, 0);
    }
}
