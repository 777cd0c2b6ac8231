use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Per-session bookkeeping: which memory ids have already been injected
/// this session, and running token accounting for the session-end summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub sent_memory_ids: HashSet<String>,
    pub tokens_used: usize,
    pub token_budget: usize,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>, token_budget: usize) -> Self {
        Self {
            session_id: session_id.into(),
            sent_memory_ids: HashSet::new(),
            tokens_used: 0,
            token_budget,
        }
    }

    pub fn mark_sent(&mut self, memory_id: &str) {
        self.sent_memory_ids.insert(memory_id.to_string());
    }

    pub fn is_sent(&self, memory_id: &str) -> bool {
        self.sent_memory_ids.contains(memory_id)
    }
}
