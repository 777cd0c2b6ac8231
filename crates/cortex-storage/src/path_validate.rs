//! Database-path validation (§6, security-mandatory).
//!
//! - Any `..` segment in the raw input is rejected before canonicalization.
//! - The canonicalized path must descend from the canonicalized project root.
//! - The canonicalized path must carry an allowed extension.
//! Violations are `StorageError::PathRejected`, which maps to `ErrorKind::Security`
//! (exit code 2, blocking).

use std::path::{Component, Path, PathBuf};

use cortex_core::constants::ALLOWED_DB_EXTENSIONS;
use cortex_core::errors::{CortexResult, StorageError};

pub fn validate_db_path(raw: &Path, project_root: &Path) -> CortexResult<PathBuf> {
    if raw.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StorageError::PathRejected {
            reason: format!("path contains a `..` segment: {}", raw.display()),
        }
        .into());
    }

    let canonical_root = project_root.canonicalize().map_err(|e| StorageError::PathRejected {
        reason: format!("project root does not exist: {e}"),
    })?;

    // The db file itself may not exist yet; canonicalize its parent and
    // rejoin the file name so a first-run path still validates.
    let parent = raw.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = raw.file_name().ok_or_else(|| StorageError::PathRejected {
        reason: format!("path has no file name: {}", raw.display()),
    })?;

    let canonical_parent = parent.canonicalize().map_err(|e| StorageError::PathRejected {
        reason: format!("cannot resolve parent directory: {e}"),
    })?;
    let canonical = canonical_parent.join(file_name);

    if !canonical.starts_with(&canonical_root) {
        return Err(StorageError::PathRejected {
            reason: format!(
                "{} does not descend from project root {}",
                canonical.display(),
                canonical_root.display()
            ),
        }
        .into());
    }

    let ext_ok = canonical
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_DB_EXTENSIONS.contains(&e))
        .unwrap_or(false);
    if !ext_ok {
        return Err(StorageError::PathRejected {
            reason: format!("unrecognized database extension: {}", canonical.display()),
        }
        .into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_dir_segments_before_canonicalizing() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("../escape.db");
        assert!(validate_db_path(&bad, tmp.path()).is_err());
    }

    #[test]
    fn rejects_paths_outside_project_root() {
        let root = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let path = outside.path().join("memory.db");
        std::fs::write(&path, b"").unwrap();
        assert!(validate_db_path(&path, root.path()).is_err());
    }

    #[test]
    fn rejects_disallowed_extension() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("memory.txt");
        assert!(validate_db_path(&path, root.path()).is_err());
    }

    #[test]
    fn accepts_valid_path_under_root() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("memory.sqlite3");
        let result = validate_db_path(&path, root.path());
        assert!(result.is_ok());
    }
}
