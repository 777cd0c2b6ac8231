use chrono::{DateTime, Utc};

use crate::errors::CortexResult;
use crate::memory::{ContentType, MemoryEntry};

/// Narrows a lexical/vector search to a content_type and/or keyword set,
/// applied at the database level before fusion (§4.3).
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub content_type: Option<ContentType>,
    pub keywords: Vec<String>,
}

/// Component B's public contract.
pub trait IMemoryStorage: Send + Sync {
    fn insert(&self, entry: &MemoryEntry, vector: Option<&[f32]>) -> CortexResult<String>;
    fn get(&self, id: &str) -> CortexResult<Option<MemoryEntry>>;
    fn delete(&self, id: &str) -> CortexResult<()>;

    fn lexical_search(
        &self,
        query_text: &str,
        limit: usize,
        filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>>;

    fn vector_search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>>;

    fn scan_recent(&self, since: DateTime<Utc>, limit: usize) -> CortexResult<Vec<MemoryEntry>>;
}
