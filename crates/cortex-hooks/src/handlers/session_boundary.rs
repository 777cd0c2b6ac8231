//! Shared `session-end` / `pre-compact` workflow (§4.5): aggregate a
//! summary, store it as a memory entry, and write the marker file for the
//! next `session-start` to consume. Both hooks must be non-blocking to
//! host shutdown/compaction, so every step here swallows its own errors
//! into a warning rather than propagating.

use std::collections::BTreeSet;

use chrono::Duration as ChronoDuration;
use cortex_core::errors::CortexResult;
use cortex_core::memory::{ContentType, MemoryEntry};

use crate::context::HookContext;
use crate::event::HookEvent;

/// No session concept exists in storage (§4.5: "all entries since session
/// start if no session concept exists"), so the aggregation window
/// approximates "this session" as the trailing window below.
const SESSION_AGGREGATE_WINDOW_HOURS: i64 = 6;

pub fn handle(ctx: &HookContext, event: &HookEvent) -> CortexResult<()> {
    let session_id = event.session_id();

    if let Err(e) = run(ctx, session_id) {
        tracing::warn!(error = %e, "session boundary summary failed");
    }

    Ok(())
}

fn run(ctx: &HookContext, session_id: &str) -> CortexResult<()> {
    let since = chrono::Utc::now() - ChronoDuration::hours(SESSION_AGGREGATE_WINDOW_HOURS);
    let entries = ctx.storage.scan_recent(since, 10_000)?;

    let files_modified: BTreeSet<&str> = entries.iter().filter_map(|e| e.file_path.as_deref()).collect();
    let decisions = entries.iter().filter(|e| e.content_type == ContentType::Decision).count();
    let learnings = entries.iter().filter(|e| e.content_type == ContentType::Learning).count();
    let tasks_completed = entries
        .iter()
        .filter(|e| e.file_path.as_deref() == Some("todo://session"))
        .count();

    let degradations = {
        let mut obs = ctx.observability.lock().expect("poisoned");
        for event in ctx.search.drain_degradations() {
            obs.record_degradation(event);
        }
        obs.degradation.events().len()
    };

    let summary = render_summary(files_modified.len(), tasks_completed, decisions, learnings, degradations);

    let entry = MemoryEntry::new(summary.clone(), ContentType::Context, []);
    if let Err(e) = ctx.storage.insert(&entry, None) {
        tracing::warn!(error = %e, "failed to store session summary as a memory entry");
    }

    ctx.marker.write(&summary)?;
    let _ = ctx.sessions.close(session_id);
    Ok(())
}

fn render_summary(files_modified: usize, tasks_completed: usize, decisions: usize, learnings: usize, degradations: usize) -> String {
    format!(
        "## Summary\n- Files modified: {files_modified}\n- Tasks completed: {tasks_completed}\n- Decisions recorded: {decisions}\n- Learnings captured: {learnings}\n- Degradation events: {degradations}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_counters() {
        let summary = render_summary(3, 2, 1, 4, 0);
        assert!(summary.contains("Files modified: 3"));
        assert!(summary.contains("Tasks completed: 2"));
        assert!(summary.contains("Decisions recorded: 1"));
        assert!(summary.contains("Learnings captured: 4"));
    }
}
