//! `user-prompt-submit` workflow (§4.5): same shape as `pre-tool-use`
//! steps 3-5, keyed off the prompt text; no resource-monitor gate, since
//! prompt enhancement is considered higher-value than tool injection.

use std::time::Instant;

use cortex_core::errors::CortexResult;

use crate::context::HookContext;
use crate::event::HookEvent;
use crate::output::ContextInjection;

pub fn handle(ctx: &HookContext, event: &HookEvent, deadline: Instant) -> CortexResult<Option<ContextInjection>> {
    let (session_id, prompt) = match event {
        HookEvent::UserPromptSubmit { session_id, prompt, .. } => (session_id, prompt),
        _ => unreachable!("dispatch guarantees event kind"),
    };

    super::assemble_injection(ctx, session_id, prompt, deadline)
}
