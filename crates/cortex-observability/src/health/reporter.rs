//! Builds a [`HealthReport`] from a [`HealthSnapshot`] (§9 Open Question
//! resolution: the resource monitor is implemented as this snapshot/report
//! pair, with `Unhealthy` mapping to the source's `CRITICAL`).

use cortex_core::constants::HEALTH_SNAPSHOT_CACHE_SECS;
use cortex_core::errors::CortexResult;
use cortex_core::models::{HealthReport, HealthSnapshot, HealthStatus};

pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: HealthSnapshot) -> CortexResult<HealthReport> {
        let status = Self::derive_status(&snapshot);
        Ok(HealthReport { status, snapshot })
    }

    fn derive_status(snapshot: &HealthSnapshot) -> HealthStatus {
        if snapshot.recent_error_rate >= 0.5 {
            HealthStatus::Unhealthy
        } else if snapshot.recent_error_rate >= 0.1 || snapshot.embedding_cache_hit_rate < 0.2 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}

/// Caches a [`HealthReport`] for [`HEALTH_SNAPSHOT_CACHE_SECS`] so the
/// `pre-tool-use` gate doesn't recompute it on every single tool call.
pub struct CachedHealthReporter {
    cached: std::sync::Mutex<Option<(std::time::Instant, HealthReport)>>,
}

impl CachedHealthReporter {
    pub fn new() -> Self {
        Self { cached: std::sync::Mutex::new(None) }
    }

    pub fn get_or_build(&self, compute: impl FnOnce() -> CortexResult<HealthSnapshot>) -> CortexResult<HealthReport> {
        let mut guard = self.cached.lock().expect("poisoned");
        if let Some((at, report)) = guard.as_ref() {
            if at.elapsed().as_secs() < HEALTH_SNAPSHOT_CACHE_SECS {
                return Ok(report.clone());
            }
        }
        let report = HealthReporter::build(compute()?)?;
        *guard = Some((std::time::Instant::now(), report.clone()));
        Ok(report)
    }
}

impl Default for CachedHealthReporter {
    fn default() -> Self {
        Self::new()
    }
}
