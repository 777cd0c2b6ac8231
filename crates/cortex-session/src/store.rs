//! File-backed persistence for `SessionContext`.
//!
//! Each hook invocation is a short-lived process, so session bookkeeping
//! (which memory ids were already injected this session) cannot live only
//! in memory — it is read at the start of every hook and written back at
//! the end, one JSON file per session id under `state_dir`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use cortex_core::errors::CortexResult;
use cortex_core::models::SessionContext;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct SessionStore {
    state_dir: PathBuf,
}

impl SessionStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self { state_dir: state_dir.into() }
    }

    fn path_for(&self, session_id: &str) -> PathBuf {
        self.state_dir.join(format!("{session_id}.json"))
    }

    /// Load an existing session, or create a fresh one with `token_budget`.
    pub fn load_or_create(&self, session_id: &str, token_budget: usize) -> CortexResult<SessionContext> {
        let path = self.path_for(session_id);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|_| SessionContext::new(session_id, token_budget))),
            Err(_) => Ok(SessionContext::new(session_id, token_budget)),
        }
    }

    /// Persist atomically: write to a temp file in the same directory, then
    /// rename, so a crash mid-write never leaves a truncated session file.
    ///
    /// The temp file name is unique per call (pid + a process-local
    /// counter) so two hook processes racing to save the same session id
    /// never share an inode before either renames — the result is always
    /// one writer's complete file, never an interleaved hybrid.
    pub fn save(&self, session: &SessionContext) -> CortexResult<()> {
        std::fs::create_dir_all(&self.state_dir)?;
        let path = self.path_for(&session.session_id);
        let unique = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = path.with_extension(format!(
            "json.{}.{}.tmp",
            std::process::id(),
            unique
        ));
        let body = serde_json::to_string(session).map_err(std::io::Error::other)?;
        std::fs::write(&tmp_path, body)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn remove(&self, session_id: &str) -> CortexResult<()> {
        let path = self.path_for(session_id);
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_session_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let mut session = store.load_or_create("s1", 2000).unwrap();
        session.mark_sent("mem-1");
        store.save(&session).unwrap();

        let reloaded = store.load_or_create("s1", 2000).unwrap();
        assert!(reloaded.is_sent("mem-1"));
    }

    #[test]
    fn missing_session_creates_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let session = store.load_or_create("new-session", 1500).unwrap();
        assert_eq!(session.token_budget, 1500);
        assert!(session.sent_memory_ids.is_empty());
    }
}
