mod context_config;
mod embedding_config;
mod hook_config;
mod retrieval_config;
mod storage_config;

pub use context_config::{ContextConfig, ContextStrategy};
pub use embedding_config::EmbeddingConfig;
pub use hook_config::{FeedbackLevel, HookConfig};
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

/// Aggregate configuration for the whole engine, as read once at process
/// start by a hook binary.
#[derive(Debug, Clone)]
pub struct CortexConfig {
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
    pub context: ContextConfig,
    pub hook: HookConfig,
}

impl CortexConfig {
    pub fn from_env() -> Self {
        Self {
            embedding: EmbeddingConfig::from_env(),
            storage: StorageConfig::from_env(),
            retrieval: RetrievalConfig::from_env(),
            context: ContextConfig::from_env(),
            hook: HookConfig::from_env(),
        }
    }
}

/// Read an env var and parse it, falling back to `default` on absence or
/// parse failure. Shared by every per-domain config module.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "0" | "false" | "off" | "no"),
        Err(_) => default,
    }
}
