//! `ObservabilityEngine` — owns the health reporter, degradation tracker,
//! and query log; the three ambient subsystems every component feeds.

use cortex_core::errors::CortexResult;
use cortex_core::models::{DegradationEvent, HealthReport, HealthSnapshot};

use crate::degradation::DegradationTracker;
use crate::health::CachedHealthReporter;
use crate::query_log::{QueryLog, QueryLogEntry};

pub struct ObservabilityEngine {
    pub health: CachedHealthReporter,
    pub degradation: DegradationTracker,
    pub query_log: QueryLog,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self {
            health: CachedHealthReporter::new(),
            degradation: DegradationTracker::new(),
            query_log: QueryLog::new(),
        }
    }

    pub fn health_report(&self, compute: impl FnOnce() -> CortexResult<HealthSnapshot>) -> CortexResult<HealthReport> {
        self.health.get_or_build(compute)
    }

    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.degradation.record(event);
    }

    pub fn record_query(&mut self, entry: QueryLogEntry) {
        self.query_log.record(entry);
    }
}

impl Default for ObservabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}
