//! SessionManager — concurrent in-process cache over `SessionStore`.
//!
//! Each hook invocation is its own process, so the DashMap only helps when
//! a single invocation handles a session concurrently (e.g. a resource
//! check running alongside a search); persistence across invocations goes
//! through `SessionStore`.

use std::sync::Arc;

use dashmap::DashMap;

use cortex_core::errors::CortexResult;
use cortex_core::models::SessionContext;

use crate::store::SessionStore;

pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionContext>>,
    store: SessionStore,
}

impl SessionManager {
    pub fn new(store: SessionStore) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            store,
        }
    }

    /// Load a session from disk (or create fresh) and cache it in memory.
    pub fn open(&self, session_id: &str, token_budget: usize) -> CortexResult<()> {
        let session = self.store.load_or_create(session_id, token_budget)?;
        self.sessions.insert(session_id.to_string(), session);
        Ok(())
    }

    pub fn get(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    pub fn mark_sent(&self, session_id: &str, memory_id: &str) -> bool {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.mark_sent(memory_id);
            true
        } else {
            false
        }
    }

    pub fn is_sent(&self, session_id: &str, memory_id: &str) -> bool {
        self.sessions.get(session_id).map(|s| s.is_sent(memory_id)).unwrap_or(false)
    }

    /// Flush the in-memory session back to disk. Callers run this at the
    /// end of every hook invocation that touched a session.
    pub fn persist(&self, session_id: &str) -> CortexResult<()> {
        if let Some(session) = self.sessions.get(session_id) {
            self.store.save(&session)?;
        }
        Ok(())
    }

    pub fn close(&self, session_id: &str) -> CortexResult<()> {
        self.persist(session_id)?;
        self.sessions.remove(session_id);
        self.store.remove(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
