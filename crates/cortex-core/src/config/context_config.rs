use super::env_or;
use crate::constants::DEFAULT_ASSEMBLER_CANDIDATE_POOL;

/// Strategy used by the context assembler's greedy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStrategy {
    Relevance,
    Recency,
    Diverse,
}

impl Default for ContextStrategy {
    fn default() -> Self {
        ContextStrategy::Relevance
    }
}

impl std::str::FromStr for ContextStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(ContextStrategy::Relevance),
            "recency" => Ok(ContextStrategy::Recency),
            "diverse" => Ok(ContextStrategy::Diverse),
            other => Err(format!("unknown context strategy: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub max_tokens: usize,
    pub candidate_pool: usize,
    pub default_strategy: ContextStrategy,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            candidate_pool: DEFAULT_ASSEMBLER_CANDIDATE_POOL,
            default_strategy: ContextStrategy::Relevance,
        }
    }
}

impl ContextConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            max_tokens: env_or("CORTEX_CONTEXT_MAX_TOKENS", d.max_tokens),
            candidate_pool: d.candidate_pool,
            default_strategy: d.default_strategy,
        }
    }
}
