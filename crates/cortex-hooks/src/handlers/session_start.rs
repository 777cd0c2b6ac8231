//! `session-start` workflow (§4.5): one-time display of the prior
//! session's summary marker, then consume it.

use cortex_core::errors::CortexResult;

use crate::context::HookContext;
use crate::event::HookEvent;

const BANNER_OPEN: &str = "===== cortex: last session summary =====";
const BANNER_CLOSE: &str = "=========================================";

/// Returns the banner text to print to stderr, or `None` if there was no
/// marker to consume.
pub fn handle(ctx: &HookContext, event: &HookEvent) -> CortexResult<Option<String>> {
    let HookEvent::SessionStart { .. } = event else {
        unreachable!("dispatch guarantees event kind");
    };

    match ctx.marker.read_and_consume()? {
        Some(summary) => Ok(Some(format!("{BANNER_OPEN}\n{summary}\n{BANNER_CLOSE}"))),
        None => Ok(None),
    }
}
