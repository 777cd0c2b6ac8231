//! FTS5 full-text search, filtered by content_type/keywords at the DB level
//! (§4.3 Filtering) before fusion.

use rusqlite::{params, Connection};

use cortex_core::errors::CortexResult;
use cortex_core::traits::SearchFilter;

use super::memory_crud::row_to_memory;
use crate::to_storage_err;

/// Returns `(id, bm25_rank)` pairs ordered by relevance, most relevant first.
/// FTS5's `rank` is negative log-odds (smaller/more negative is better); we
/// invert sign so callers see larger-is-better scores consistently with
/// vector similarity.
pub fn search_fts5(
    conn: &Connection,
    query: &str,
    limit: usize,
    filter: &SearchFilter,
) -> CortexResult<Vec<(String, f64)>> {
    let mut stmt = conn
        .prepare(
            "SELECT m.id, -fts.rank AS score
             FROM memory_fts fts
             JOIN memory m ON m.rowid = fts.rowid
             WHERE memory_fts MATCH ?1
               AND (?2 IS NULL OR m.content_type = ?2)
             ORDER BY fts.rank LIMIT ?3",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let content_type = filter.content_type.map(|ct| ct.as_str());
    let rows = stmt
        .query_map(params![query, content_type, limit as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, score) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if filter.keywords.is_empty() || keywords_match(conn, &id, &filter.keywords)? {
            out.push((id, score));
        }
    }
    Ok(out)
}

fn keywords_match(conn: &Connection, id: &str, keywords: &[String]) -> CortexResult<bool> {
    if let Some(entry) = super::memory_crud::get_memory(conn, id)? {
        Ok(keywords.iter().any(|k| entry.keywords.contains(&k.to_lowercase())))
    } else {
        Ok(false)
    }
}

/// Fetch recent entries directly (used when FTS has no match for an empty
/// or degenerate query).
pub fn all_memories(conn: &Connection, limit: usize) -> CortexResult<Vec<cortex_core::memory::MemoryEntry>> {
    let mut stmt = conn
        .prepare("SELECT id, content, content_type, keywords, created_at, source_tool, file_path FROM memory ORDER BY created_at DESC LIMIT ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], row_to_memory)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(out)
}
