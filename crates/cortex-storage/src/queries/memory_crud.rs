//! Point CRUD for `memory` (+ conditional `memory_vec`). Atomic across the
//! primary table, the FTS mirror (trigger-driven), and the vector table
//! (explicit, conditional) per I4.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use cortex_core::errors::{CortexResult, StorageError};
use cortex_core::memory::{ContentType, MemoryEntry};

use crate::to_storage_err;

pub fn insert_memory(conn: &Connection, entry: &MemoryEntry, vector: Option<&[f32]>) -> CortexResult<String> {
    let keywords_json = serde_json::to_string(&entry.keywords).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute_batch("SAVEPOINT insert_memory")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = insert_memory_inner(conn, entry, &keywords_json, vector);

    match result {
        Ok(id) => {
            conn.execute_batch("RELEASE insert_memory")
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(id)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK TO insert_memory");
            let _ = conn.execute_batch("RELEASE insert_memory");
            Err(e)
        }
    }
}

fn insert_memory_inner(
    conn: &Connection,
    entry: &MemoryEntry,
    keywords_json: &str,
    vector: Option<&[f32]>,
) -> CortexResult<String> {
    conn.execute(
        "INSERT INTO memory (id, content, content_type, keywords, created_at, source_tool, file_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id,
            entry.content,
            entry.content_type.as_str(),
            keywords_json,
            entry.created_at.to_rfc3339(),
            entry.source_tool,
            entry.file_path,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    if let Some(v) = vector {
        let blob = f32_vec_to_bytes(v);
        conn.execute(
            "INSERT INTO memory_vec (entry_id, vector, dimension, model_id) VALUES (?1, ?2, ?3, ?4)",
            params![entry.id, blob, v.len() as i64, "unspecified"],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(entry.id.clone())
}

pub fn get_memory(conn: &Connection, id: &str) -> CortexResult<Option<MemoryEntry>> {
    conn.query_row(
        "SELECT id, content, content_type, keywords, created_at, source_tool, file_path
         FROM memory WHERE id = ?1",
        params![id],
        row_to_memory,
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))?
    .transpose()
}

pub fn delete_memory(conn: &Connection, id: &str) -> CortexResult<()> {
    let affected = conn
        .execute("DELETE FROM memory WHERE id = ?1", params![id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    if affected == 0 {
        return Err(StorageError::NotFound { id: id.to_string() }.into());
    }
    Ok(())
}

pub fn scan_recent(conn: &Connection, since: DateTime<Utc>, limit: usize) -> CortexResult<Vec<MemoryEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, content, content_type, keywords, created_at, source_tool, file_path
             FROM memory WHERE created_at >= ?1 ORDER BY created_at DESC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![since.to_rfc3339(), limit as i64], row_to_memory)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(out)
}

pub(crate) fn row_to_memory(row: &Row) -> rusqlite::Result<CortexResult<MemoryEntry>> {
    let id: String = row.get(0)?;
    let content: String = row.get(1)?;
    let content_type_raw: String = row.get(2)?;
    let keywords_json: String = row.get(3)?;
    let created_at_raw: String = row.get(4)?;
    let source_tool: Option<String> = row.get(5)?;
    let file_path: Option<String> = row.get(6)?;

    Ok((|| {
        let content_type: ContentType = content_type_raw
            .parse()
            .map_err(|e: String| to_storage_err(e))?;
        let keywords: BTreeSet<String> =
            serde_json::from_str(&keywords_json).map_err(|e| to_storage_err(e.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
            .map_err(|e| to_storage_err(e.to_string()))?
            .with_timezone(&Utc);

        Ok(MemoryEntry {
            id,
            content,
            content_type,
            keywords,
            created_at,
            source_tool,
            file_path,
        })
    })())
}

pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
