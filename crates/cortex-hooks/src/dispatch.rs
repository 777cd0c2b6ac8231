//! Top-level dispatch: run one hook workflow to completion, map its
//! result to one of the three exit-code policies, and emit the single
//! structured per-invocation log line (§4.5 Ambient).

use std::time::Instant;

use cortex_core::errors::CortexResult;

use crate::context::HookContext;
use crate::event::HookEvent;
use crate::handlers::{post_tool_use, pre_tool_use, session_boundary, session_start, user_prompt_submit};
use crate::output::ContextInjection;

pub struct DispatchOutcome {
    pub exit_code: i32,
    pub stdout: Option<ContextInjection>,
    pub banner: Option<String>,
}

pub fn dispatch(ctx: &HookContext, event: HookEvent) -> DispatchOutcome {
    let start = Instant::now();
    let event_name = event.name().to_string();
    let session_id = event.session_id().to_string();
    let deadline = start + std::time::Duration::from_secs(ctx.config.hook.timeout_secs);

    let span = cortex_observability::hook_span!(event_name);
    let _guard = span.enter();

    let result = run(ctx, &event, deadline);

    let (exit_code, stdout, banner) = match result {
        Ok((stdout, banner)) => (0, stdout, banner),
        Err(e) => {
            tracing::warn!(error = %e, event = %event_name, "hook workflow failed");
            (e.kind().exit_code(), None, None)
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        hook_event = %event_name,
        session_id = %session_id,
        duration_ms,
        exit_code,
        "hook invocation complete"
    );

    DispatchOutcome { exit_code, stdout, banner }
}

type WorkflowResult = CortexResult<(Option<ContextInjection>, Option<String>)>;

fn run(ctx: &HookContext, event: &HookEvent, deadline: Instant) -> WorkflowResult {
    if !ctx.config.hook.hook_enabled(event.name()) {
        return Ok((None, None));
    }

    match event {
        HookEvent::PreToolUse { .. } => Ok((pre_tool_use::handle(ctx, event, deadline)?, None)),
        HookEvent::PostToolUse { .. } => {
            post_tool_use::handle(ctx, event)?;
            Ok((None, None))
        }
        HookEvent::UserPromptSubmit { .. } => Ok((user_prompt_submit::handle(ctx, event, deadline)?, None)),
        HookEvent::SessionStart { .. } => Ok((None, session_start::handle(ctx, event)?)),
        HookEvent::SessionEnd { .. } | HookEvent::PreCompact { .. } => {
            session_boundary::handle(ctx, event)?;
            Ok((None, None))
        }
    }
}
