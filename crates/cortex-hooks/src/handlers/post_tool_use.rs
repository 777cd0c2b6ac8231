//! `post-tool-use` workflow (§4.5): the ingest path.

use cortex_core::errors::CortexResult;
use cortex_core::memory::MemoryEntry;
use cortex_core::models::DegradationEvent;

use crate::context::HookContext;
use crate::event::HookEvent;
use crate::ingest::derive_candidate;

pub fn handle(ctx: &HookContext, event: &HookEvent) -> CortexResult<()> {
    let (tool_name, tool_input, tool_response) = match event {
        HookEvent::PostToolUse {
            tool_name,
            tool_input,
            tool_response,
            ..
        } => (tool_name, tool_input, tool_response),
        _ => unreachable!("dispatch guarantees event kind"),
    };

    let Some(candidate) = derive_candidate(tool_name, tool_input, tool_response) else {
        return Ok(());
    };

    let mut entry = MemoryEntry::new(candidate.content, candidate.content_type, candidate.keywords)
        .with_source_tool(tool_name.clone());
    if let Some(path) = candidate.file_path {
        entry = entry.with_file_path(path);
    }

    let vector = match ctx.embedder.embed(&entry.content) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "embedding unavailable during ingest, inserting lexical-only");
            ctx.observability
                .lock()
                .expect("poisoned")
                .record_degradation(DegradationEvent::new("embedding", e.to_string(), "lexical_only"));
            None
        }
    };

    ctx.storage.insert(&entry, vector.as_deref())?;
    Ok(())
}
