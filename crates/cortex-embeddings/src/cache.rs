use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use cortex_core::traits::CacheStats;
use lru::LruCache;

/// Bounded, content-addressed embedding cache. All mutations (`get`,
/// `insert`, eviction) serialize through a single mutex (§4.1 Concurrency);
/// hit/miss/eviction counters are relaxed atomics so `stats()` never blocks
/// a concurrent `get`/`insert`.
///
/// The embedder client documented in the source accepted either a
/// `threading.Lock` or an `asyncio.Lock` for this cache depending on
/// whether the embedder was sync or async. This build's embedder is
/// synchronous, so a plain `std::sync::Mutex` is used rather than an
/// async-aware lock.
pub struct LruEmbeddingCache {
    inner: Mutex<LruCache<String, Vec<f32>>>,
    max_size: u64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl LruEmbeddingCache {
    pub fn new(cap: u64) -> Self {
        let cap = NonZeroUsize::new(cap.max(1) as usize).expect("cap >= 1");
        Self {
            inner: Mutex::new(LruCache::new(cap)),
            max_size: cap.get() as u64,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Promotes the entry to most-recently-used on hit.
    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        match inner.get(key) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts `value` under `key`. If the cache is at capacity, exactly
    /// one least-recently-used entry is evicted before the new entry is
    /// placed (P6).
    pub fn insert(&self, key: String, value: Vec<f32>) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        // `push` returns the displaced entry: either the prior value for
        // `key` (an update, not an eviction) or the true LRU victim.
        if let Some((displaced_key, _)) = inner.push(key.clone(), value) {
            if displaced_key != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache mutex poisoned");
        inner.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let size = self.inner.lock().expect("cache mutex poisoned").len();
        CacheStats {
            size,
            max_size: self.max_size,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_eviction_order_matches_scenario() {
        // Scenario 2: cap=3, insert A,B,C, touch A, insert D => {A,C,D}, B evicted.
        let cache = LruEmbeddingCache::new(3);
        cache.insert("A".into(), vec![1.0]);
        cache.insert("B".into(), vec![2.0]);
        cache.insert("C".into(), vec![3.0]);
        assert!(cache.get("A").is_some());
        cache.insert("D".into(), vec![4.0]);

        assert!(cache.get("A").is_some());
        assert!(cache.get("C").is_some());
        assert!(cache.get("D").is_some());

        let stats = cache.stats();
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn never_exceeds_cap() {
        let cache = LruEmbeddingCache::new(2);
        for i in 0..10 {
            cache.insert(format!("k{i}"), vec![i as f32]);
        }
        assert!(cache.stats().size <= 2);
    }

    #[test]
    fn hit_then_miss_counts() {
        let cache = LruEmbeddingCache::new(10);
        assert!(cache.get("x").is_none());
        cache.insert("x".into(), vec![1.0]);
        assert!(cache.get("x").is_some());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    proptest::proptest! {
        /// P6: regardless of insertion order or key collisions, the cache
        /// never holds more than `cap` entries.
        #[test]
        fn size_never_exceeds_cap(cap in 1usize..16, keys in proptest::collection::vec(0u32..8, 0..64)) {
            let cache = LruEmbeddingCache::new(cap as u64);
            for k in keys {
                cache.insert(k.to_string(), vec![k as f32]);
                proptest::prop_assert!(cache.stats().size <= cap);
            }
        }

        /// Re-inserting the current most-recently-used key is an update,
        /// never an eviction.
        #[test]
        fn repeated_insert_of_same_key_never_evicts(cap in 1usize..8, value in 0i64..1000) {
            let cache = LruEmbeddingCache::new(cap as u64);
            cache.insert("only".into(), vec![value as f32]);
            let evictions_before = cache.stats().evictions;
            for _ in 0..10 {
                cache.insert("only".into(), vec![value as f32]);
            }
            proptest::prop_assert_eq!(cache.stats().evictions, evictions_before);
        }
    }
}
