use super::{env_bool, env_or};
use crate::constants::*;

/// Configuration for the embedding client and its bounded cache.
/// Populated once from environment variables; never re-read mid-process.
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub cache_enabled: bool,
    pub cache_cap: u64,
    pub dimension: usize,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub rate_limit_per_sec: u32,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_cap: DEFAULT_EMBEDDING_CACHE_CAP,
            dimension: DEFAULT_EMBEDDING_DIMENSION,
            timeout_secs: DEFAULT_EMBED_TIMEOUT_SECS,
            max_attempts: DEFAULT_EMBED_MAX_ATTEMPTS,
            rate_limit_per_sec: DEFAULT_EMBED_RATE_LIMIT_PER_SEC,
        }
    }
}

impl EmbeddingConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            cache_enabled: env_bool("CORTEX_EMBEDDING_CACHE_ENABLED", d.cache_enabled),
            cache_cap: env_or("CORTEX_EMBEDDING_CACHE_SIZE", d.cache_cap),
            dimension: d.dimension,
            timeout_secs: env_or("CORTEX_MCP_TIMEOUT", d.timeout_secs),
            max_attempts: d.max_attempts,
            rate_limit_per_sec: d.rate_limit_per_sec,
        }
    }
}
