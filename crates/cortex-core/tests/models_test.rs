use cortex_core::models::{DegradationEvent, HealthReport, HealthSnapshot, HealthStatus};
use cortex_core::models::SessionContext;

#[test]
fn degradation_event_stamps_current_time() {
    let before = chrono::Utc::now();
    let event = DegradationEvent::new("embedder", "timeout", "lexical-only");
    let after = chrono::Utc::now();
    assert_eq!(event.component, "embedder");
    assert_eq!(event.failure, "timeout");
    assert_eq!(event.fallback_used, "lexical-only");
    assert!(event.timestamp >= before && event.timestamp <= after);
}

#[test]
fn health_snapshot_default_is_all_zero() {
    let snapshot = HealthSnapshot::default();
    assert_eq!(snapshot.total_memories, 0);
    assert_eq!(snapshot.db_size_bytes, 0);
    assert_eq!(snapshot.embedding_cache_hit_rate, 0.0);
    assert_eq!(snapshot.recent_error_rate, 0.0);
}

#[test]
fn health_report_round_trips_through_json() {
    let report = HealthReport {
        status: HealthStatus::Degraded,
        snapshot: HealthSnapshot {
            total_memories: 12,
            db_size_bytes: 4096,
            embedding_cache_hit_rate: 0.5,
            recent_error_rate: 0.1,
        },
    };
    let json = serde_json::to_string(&report).unwrap();
    let back: HealthReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.status, HealthStatus::Degraded);
    assert_eq!(back.snapshot.total_memories, 12);
}

#[test]
fn session_context_tracks_sent_memory_ids() {
    let mut ctx = SessionContext::new("session-1", 2000);
    assert!(!ctx.is_sent("mem-1"));
    ctx.mark_sent("mem-1");
    assert!(ctx.is_sent("mem-1"));
    assert!(!ctx.is_sent("mem-2"));
}

#[test]
fn session_context_starts_with_zero_tokens_used() {
    let ctx = SessionContext::new("session-1", 500);
    assert_eq!(ctx.tokens_used, 0);
    assert_eq!(ctx.token_budget, 500);
    assert!(ctx.sent_memory_ids.is_empty());
}
