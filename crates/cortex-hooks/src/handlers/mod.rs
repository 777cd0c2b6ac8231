pub mod post_tool_use;
pub mod pre_tool_use;
pub mod session_boundary;
pub mod session_start;
pub mod user_prompt_submit;

use std::time::{Duration, Instant};

use cortex_context::default_counter;
use cortex_core::errors::CortexResult;
use cortex_observability::query_log::QueryLogEntry;

use crate::context::HookContext;
use crate::docs_oracle::{detect_libraries, DocSnippet};
use crate::output::ContextInjection;

/// Shared shape of `pre-tool-use` steps 3-5 and `user-prompt-submit`:
/// detect libraries in `query_text`, query the docs oracle and hybrid
/// search, pack both under the combined token budget with docs first.
/// `deadline` is the single threaded-through deadline (§4.5 execution
/// model): once past it, the docs-oracle step (the more optional of the
/// two) is skipped rather than attempted.
pub(crate) fn assemble_injection(
    ctx: &HookContext,
    session_id: &str,
    query_text: &str,
    deadline: Instant,
) -> CortexResult<Option<ContextInjection>> {
    ctx.sessions.open(session_id, ctx.config.context.max_tokens)?;

    let docs = if Instant::now() < deadline {
        let libraries = detect_libraries(query_text);
        let docs_timeout = Duration::from_secs(ctx.config.hook.docs_timeout_secs);
        ctx.docs.lookup(&libraries, docs_timeout).unwrap_or_default()
    } else {
        tracing::warn!("hook deadline exceeded before docs oracle step, skipping");
        Vec::new()
    };

    let mut session = ctx
        .sessions
        .get(session_id)
        .unwrap_or_else(|| cortex_core::models::SessionContext::new(session_id, ctx.config.context.max_tokens));

    let assembler = ctx.context_assembler();
    let search_start = Instant::now();
    let assembled = assembler.assemble(
        query_text,
        ctx.config.context.max_tokens,
        ctx.config.context.default_strategy,
        Some(&mut session),
    )?;
    let search_latency = search_start.elapsed();

    for id in &assembled.included_entry_ids {
        ctx.sessions.mark_sent(session_id, id);
    }
    ctx.sessions.persist(session_id)?;

    let degradations = ctx.search.drain_degradations();
    let degraded = !degradations.is_empty();
    {
        let mut obs = ctx.observability.lock().expect("poisoned");
        for degradation in degradations {
            obs.record_degradation(degradation);
        }
        obs.record_query(QueryLogEntry::new(
            query_text,
            search_latency,
            assembled.included_entry_ids.len(),
            degraded,
        ));
    }

    let (text, estimated_tokens, sources) = combine_docs_and_memory(&docs, &assembled.text, assembled.estimated_tokens, &assembled.sources);

    if text.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(ContextInjection {
        context: text,
        estimated_tokens,
        sources,
    }))
}

/// Docs first, then memory, truncating memory before docs if the combined
/// size exceeds the budget (docs are the higher-value, more targeted
/// signal per §4.5 step 4).
fn combine_docs_and_memory(
    docs: &[DocSnippet],
    memory_text: &str,
    memory_tokens: usize,
    memory_sources: &[String],
) -> (String, usize, Vec<String>) {
    if docs.is_empty() {
        return (memory_text.to_string(), memory_tokens, memory_sources.to_vec());
    }

    let counter = default_counter();
    let mut docs_text = String::new();
    let mut sources: Vec<String> = Vec::new();
    for snippet in docs {
        docs_text.push_str(&format!("### {}\n{}\n\n", snippet.library, snippet.text));
        sources.push(format!("docs:{}", snippet.library));
    }
    sources.extend(memory_sources.iter().cloned());

    let docs_tokens = counter.count(&docs_text);
    if memory_text.is_empty() {
        return (docs_text, docs_tokens, sources);
    }
    (format!("{docs_text}{memory_text}"), docs_tokens + memory_tokens, sources)
}
