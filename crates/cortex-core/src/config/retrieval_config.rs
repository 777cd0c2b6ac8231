use super::env_or;
use crate::constants::*;

/// RRF tuning parameters and candidate pool sizing for the hybrid search
/// engine.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub rrf_c: f64,
    pub weight_vector: f64,
    pub weight_lexical: f64,
    pub candidate_pool_multiplier: usize,
    pub relevance_threshold: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_c: DEFAULT_RRF_C,
            weight_vector: DEFAULT_RRF_WEIGHT_VECTOR,
            weight_lexical: DEFAULT_RRF_WEIGHT_LEXICAL,
            candidate_pool_multiplier: DEFAULT_CANDIDATE_POOL_MULTIPLIER,
            relevance_threshold: 0.0,
        }
    }
}

impl RetrievalConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            relevance_threshold: env_or(
                "CORTEX_CONTEXT_RELEVANCE_THRESHOLD",
                d.relevance_threshold,
            ),
            ..d
        }
    }
}
