use crate::errors::EmbedError;

/// Snapshot of cache counters. Hit-rate is derived, not stored, so it is
/// always consistent with `hits`/`misses` at read time.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Component A's public contract: turn text into a vector, amortized by a
/// bounded content-addressed cache.
pub trait IEmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
    fn stats(&self) -> CacheStats;
    fn clear(&self);
}
