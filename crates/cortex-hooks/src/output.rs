//! Structured stdout payload a hook emits when it has a context block to
//! inject (§4.5 input/output contract). Silent success writes nothing.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ContextInjection {
    pub context: String,
    pub estimated_tokens: usize,
    pub sources: Vec<String>,
}
