//! `StorageEngine` — owns the `ConnectionPool`, runs migrations on open,
//! validates the db path against the project root, and implements
//! `IMemoryStorage`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use cortex_core::errors::CortexResult;
use cortex_core::memory::MemoryEntry;
use cortex_core::traits::{IMemoryStorage, SearchFilter};

use crate::migrations;
use crate::path_validate::validate_db_path;
use crate::pool::ConnectionPool;
use crate::queries::{memory_crud, memory_search, vector_search};

pub struct StorageEngine {
    pool: ConnectionPool,
    /// In-memory mode has no shared-cache read pool (each `:memory:`
    /// connection is its own isolated database), so reads route through
    /// the writer instead.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a file-backed engine. `raw_path` is validated against
    /// `project_root` per §6 before anything touches the filesystem.
    pub fn open(
        raw_path: &Path,
        project_root: &Path,
        read_pool_size: usize,
        busy_timeout_ms: u32,
    ) -> CortexResult<Self> {
        let validated = validate_db_path(raw_path, project_root)?;
        Self::open_validated(&validated, read_pool_size, busy_timeout_ms)
    }

    fn open_validated(path: &PathBuf, read_pool_size: usize, busy_timeout_ms: u32) -> CortexResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size, busy_timeout_ms)?;
        let engine = Self { pool, use_read_pool: true };
        engine.initialize()?;
        Ok(engine)
    }

    pub fn open_in_memory() -> CortexResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self { pool, use_read_pool: false };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> CortexResult<()> {
        self.pool.writer.with_conn(|conn| migrations::run_migrations(conn))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> CortexResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> CortexResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }
}

impl IMemoryStorage for StorageEngine {
    fn insert(&self, entry: &MemoryEntry, vector: Option<&[f32]>) -> CortexResult<String> {
        self.pool.writer.with_conn(|conn| memory_crud::insert_memory(conn, entry, vector))
    }

    fn get(&self, id: &str) -> CortexResult<Option<MemoryEntry>> {
        self.with_reader(|conn| memory_crud::get_memory(conn, id))
    }

    fn delete(&self, id: &str) -> CortexResult<()> {
        self.pool.writer.with_conn(|conn| memory_crud::delete_memory(conn, id))
    }

    fn lexical_search(
        &self,
        query_text: &str,
        limit: usize,
        filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>> {
        self.with_reader(|conn| memory_search::search_fts5(conn, query_text, limit, filter))
    }

    fn vector_search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>> {
        self.with_reader(|conn| vector_search::search_vector(conn, query_vector, limit, filter))
    }

    fn scan_recent(&self, since: DateTime<Utc>, limit: usize) -> CortexResult<Vec<MemoryEntry>> {
        self.with_reader(|conn| memory_crud::scan_recent(conn, since, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::memory::ContentType;

    #[test]
    fn in_memory_round_trip() {
        let engine = StorageEngine::open_in_memory().unwrap();
        let entry = MemoryEntry::new("hello world", ContentType::Code, []);
        let id = engine.insert(&entry, Some(&[1.0, 0.0])).unwrap();

        assert!(engine.get(&id).unwrap().is_some());

        let hits = engine.lexical_search("hello", 10, &SearchFilter::default()).unwrap();
        assert_eq!(hits[0].0, id);

        let hits = engine.vector_search(&[1.0, 0.0], 10, &SearchFilter::default()).unwrap();
        assert_eq!(hits[0].0, id);

        engine.delete(&id).unwrap();
        assert!(engine.get(&id).unwrap().is_none());
    }

    #[test]
    fn open_rejects_path_outside_project_root() {
        let root = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        let bad = outside.path().join("memory.db");
        assert!(StorageEngine::open(&bad, root.path(), 4, 5000).is_err());
    }
}
