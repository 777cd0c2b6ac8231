//! SQLite persistence layer (Component B): schema migrations, connection
//! pool, CRUD, FTS5 lexical search, and brute-force vector search.

pub mod engine;
pub mod migrations;
pub mod path_validate;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use cortex_core::errors::{CortexError, StorageError};

/// All `rusqlite`/`serde_json`/parse failures funnel through here as
/// `StorageError::Sqlite`, since none of them are distinguishable from a
/// caller's perspective beyond "the storage layer failed".
pub(crate) fn to_storage_err(message: String) -> CortexError {
    CortexError::Storage(StorageError::Sqlite { message })
}
