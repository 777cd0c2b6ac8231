use serde::{Deserialize, Serialize};

/// Overall resource-monitor status. `Unhealthy` is the build's mapping of
/// the source's `CRITICAL`; its only effect on the core is causing
/// `pre-tool-use` to skip context injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Lightweight snapshot of system resource/cache state, recomputed at most
/// once per [`crate::constants::HEALTH_SNAPSHOT_CACHE_SECS`] seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub total_memories: usize,
    pub db_size_bytes: u64,
    pub embedding_cache_hit_rate: f64,
    pub recent_error_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub snapshot: HealthSnapshot,
}
