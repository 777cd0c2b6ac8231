//! Query performance logging: query text, latency, result count, degraded
//! flag. Bounded ring buffer inspected by the `session-end` summary (§4.3
//! Ambient).

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub latency: Duration,
    pub result_count: usize,
    pub degraded: bool,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    pub fn new(query: impl Into<String>, latency: Duration, result_count: usize, degraded: bool) -> Self {
        Self {
            query: query.into(),
            latency,
            result_count,
            degraded,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn new() -> Self {
        Self { entries: Vec::new(), max_entries: 50_000 }
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self { entries: Vec::new(), max_entries }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            query = %entry.query,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            degraded = entry.degraded,
            "query logged"
        );
        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    pub fn degraded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.degraded).count()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_evicts_oldest() {
        let mut log = QueryLog::with_capacity(2);
        log.record(QueryLogEntry::new("a", Duration::from_millis(1), 1, false));
        log.record(QueryLogEntry::new("b", Duration::from_millis(1), 1, false));
        log.record(QueryLogEntry::new("c", Duration::from_millis(1), 1, false));
        assert_eq!(log.count(), 2);
        assert_eq!(log.entries()[0].query, "b");
    }
}
