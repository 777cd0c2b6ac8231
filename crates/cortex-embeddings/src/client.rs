use std::sync::Mutex;
use std::time::Duration;

use cortex_core::config::EmbeddingConfig;
use cortex_core::errors::EmbedError;
use cortex_core::models::DegradationEvent;
use cortex_core::traits::{CacheStats, IEmbeddingProvider};
use rand::Rng;
use tracing::{debug, warn};

use crate::backend::EmbedderBackend;
use crate::cache::LruEmbeddingCache;
use crate::cache_key;
use crate::rate_limit::RateLimiter;

/// Component A end to end: cache lookup, non-blocking rate-limit check,
/// retried call to the backend with exponential backoff and jitter, cache
/// insert on success.
pub struct EmbeddingClient {
    cache: Option<LruEmbeddingCache>,
    limiter: RateLimiter,
    backend: Box<dyn EmbedderBackend>,
    config: EmbeddingConfig,
    degradations: Mutex<Vec<DegradationEvent>>,
}

impl EmbeddingClient {
    pub fn new(backend: Box<dyn EmbedderBackend>, config: EmbeddingConfig) -> Self {
        let cache = config
            .cache_enabled
            .then(|| LruEmbeddingCache::new(config.cache_cap));
        Self {
            cache,
            limiter: RateLimiter::new(config.rate_limit_per_sec),
            backend,
            config,
            degradations: Mutex::new(Vec::new()),
        }
    }

    /// Drain pending degradation events, e.g. for a `session-end` summary.
    pub fn drain_degradations(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.degradations.lock().expect("poisoned"))
    }

    fn record_degradation(&self, failure: &str) {
        self.degradations.lock().expect("poisoned").push(DegradationEvent::new(
            "embedding_client",
            failure,
            "lexical_only",
        ));
    }

    fn call_with_retry(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if !self.limiter.try_acquire() {
            return Err(EmbedError::RateLimited);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.backend.embed_remote(text) {
                Ok(v) => return Ok(v),
                Err(EmbedError::Rejected { reason }) => {
                    // Permanent: no point retrying bad input.
                    return Err(EmbedError::Rejected { reason });
                }
                Err(e) if attempt >= self.config.max_attempts => {
                    warn!(attempt, "embedder exhausted retry budget");
                    return Err(e);
                }
                Err(e) => {
                    let backoff_ms = 2u64.pow(attempt) * 100;
                    let jitter_ms: u64 = rand::thread_rng().gen_range(0..=backoff_ms / 2);
                    debug!(attempt, backoff_ms, "embedder call failed, retrying");
                    std::thread::sleep(Duration::from_millis(backoff_ms + jitter_ms));
                    let _ = e;
                }
            }
        }
    }
}

impl IEmbeddingProvider for EmbeddingClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.is_empty() {
            return Err(EmbedError::Rejected {
                reason: "empty input".into(),
            });
        }

        let key = cache_key(text);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key) {
                return Ok(hit);
            }
        }

        match self.call_with_retry(text) {
            Ok(vector) => {
                if let Some(cache) = &self.cache {
                    cache.insert(key, vector.clone());
                }
                Ok(vector)
            }
            Err(e) => {
                self.record_degradation(&e.to_string());
                Err(e)
            }
        }
    }

    fn stats(&self) -> CacheStats {
        self.cache.as_ref().map(LruEmbeddingCache::stats).unwrap_or_default()
    }

    fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}
