//! `pre-tool-use` workflow (§4.5): the inject path. Gated by tool type and
//! by resource-monitor health; never blocks the tool call on failure.

use std::time::Instant;

use cortex_core::errors::CortexResult;
use cortex_core::models::{HealthSnapshot, HealthStatus};

use crate::context::HookContext;
use crate::event::HookEvent;
use crate::output::ContextInjection;

const INJECTABLE_TOOLS: &[&str] = &["Write", "Edit", "MultiEdit"];

pub fn handle(ctx: &HookContext, event: &HookEvent, deadline: Instant) -> CortexResult<Option<ContextInjection>> {
    let (session_id, tool_name, tool_input) = match event {
        HookEvent::PreToolUse { session_id, tool_name, tool_input, .. } => (session_id, tool_name, tool_input),
        _ => unreachable!("dispatch guarantees event kind"),
    };

    if !INJECTABLE_TOOLS.contains(&tool_name.as_str()) {
        return Ok(None);
    }

    let health = health_report(ctx)?;
    if health.status == HealthStatus::Unhealthy {
        tracing::warn!("resource monitor unhealthy, skipping context injection");
        return Ok(None);
    }

    let query_text = serde_json::to_string(tool_input).unwrap_or_default();
    super::assemble_injection(ctx, session_id, &query_text, deadline)
}

fn health_report(ctx: &HookContext) -> CortexResult<cortex_core::models::HealthReport> {
    let (query_count, recent_degradations) = {
        let obs = ctx.observability.lock().expect("poisoned");
        (obs.query_log.count().max(1), obs.degradation.count_all_recent(300))
    };
    let total_memories = ctx
        .storage
        .scan_recent(chrono::DateTime::<chrono::Utc>::MIN_UTC, 100_000)?
        .len();
    let db_size_bytes = std::fs::metadata(&ctx.config.storage.db_path)
        .map(|m| m.len())
        .unwrap_or(0);
    let embedding_cache_hit_rate = ctx.embedder.stats().hit_rate();
    let recent_error_rate = recent_degradations as f64 / query_count as f64;

    let snapshot = HealthSnapshot {
        total_memories,
        db_size_bytes,
        embedding_cache_hit_rate,
        recent_error_rate,
    };

    let mut obs = ctx.observability.lock().expect("poisoned");
    obs.health_report(|| Ok(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_injectable_tool_yields_no_output() {
        // `INJECTABLE_TOOLS` is the whole gate for non-write tools; no
        // `HookContext` is needed to observe the early return.
        assert!(!INJECTABLE_TOOLS.contains(&"Read"));
    }
}
