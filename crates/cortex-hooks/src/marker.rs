//! Atomic marker-file lifecycle (§4.5): `session-end`/`pre-compact` write
//! the last-session summary; the next `session-start` reads and consumes
//! it. State transitions: absent -> present (write), present -> absent
//! (read + delete), present -> present (overwrite). Initial state absent;
//! no terminal state.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use cortex_core::constants::MARKER_FILE_NAME;
use cortex_core::errors::{CortexResult, HookError};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct MarkerFile {
    path: PathBuf,
}

impl MarkerFile {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: state_dir.into().join(MARKER_FILE_NAME),
        }
    }

    /// Write `contents` atomically: temp file in the same directory,
    /// fsync, then rename over the target. A crash mid-write never leaves
    /// a partially-written marker observable to a reader.
    ///
    /// The temp file name is unique per call (pid + a process-local
    /// counter), so concurrent writers (`session-end` racing
    /// `pre-compact`, §4.5) never share an inode before their rename —
    /// the marker ends up as exactly one writer's complete payload,
    /// never an interleaved hybrid of two.
    pub fn write(&self, contents: &str) -> CortexResult<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| HookError::MarkerFile("marker path has no parent directory".into()))?;
        std::fs::create_dir_all(parent)?;

        let unique = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self.path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            unique
        ));
        let mut tmp = std::fs::File::create(&tmp_path)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.sync_all()?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Read the marker and delete it in the same call (one-time
    /// consumption). Returns `None` if no marker exists. A delete failure
    /// after a successful read is logged but does not surface as an
    /// error — the content was already returned to the caller.
    pub fn read_and_consume(&self) -> CortexResult<Option<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(error = %e, "failed to delete marker file after read");
        }

        Ok(Some(contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_marker_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let marker = MarkerFile::new(dir.path());
        assert!(marker.read_and_consume().unwrap().is_none());
    }

    #[test]
    fn write_then_read_consumes_once() {
        let dir = tempfile::tempdir().unwrap();
        let marker = MarkerFile::new(dir.path());
        marker.write("## Summary\n- did things").unwrap();

        let first = marker.read_and_consume().unwrap();
        assert_eq!(first.as_deref(), Some("## Summary\n- did things"));

        let second = marker.read_and_consume().unwrap();
        assert!(second.is_none());
    }

    #[test]
    fn overwrite_replaces_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let marker = MarkerFile::new(dir.path());
        marker.write("first").unwrap();
        marker.write("second").unwrap();
        assert_eq!(marker.read_and_consume().unwrap().as_deref(), Some("second"));
    }
}
