use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ContentType;

/// The primary persistent record. Exists independently of its embedding
/// (I1): an entry without a vector row remains lexically searchable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    /// Deduplicated, normalized (I3). Use [`normalize_keywords`] to build
    /// this set from raw extracted tokens.
    pub keywords: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub source_tool: Option<String>,
    pub file_path: Option<String>,
}

impl MemoryEntry {
    /// Construct a new entry with a freshly generated id and the current
    /// timestamp. `id` is immutable once inserted (I2).
    pub fn new(
        content: impl Into<String>,
        content_type: ContentType,
        keywords: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            content_type,
            keywords: normalize_keywords(keywords),
            created_at: Utc::now(),
            source_tool: None,
            file_path: None,
        }
    }

    pub fn with_source_tool(mut self, tool: impl Into<String>) -> Self {
        self.source_tool = Some(tool.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

/// Normalize raw keyword tokens per I3: lowercase, trimmed, non-empty,
/// deduplicated.
pub fn normalize_keywords(raw: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    raw.into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}
