//! Vector KNN search: brute-force cosine similarity over `memory_vec`, since
//! no sqlite-vec extension is loaded. Filter is applied at the DB level by
//! joining through `memory` before ranking, so rank positions reflect the
//! filtered universe.

use rusqlite::{params, Connection};

use cortex_core::errors::{CortexResult, StorageError};
use cortex_core::traits::SearchFilter;

use super::memory_crud::bytes_to_f32_vec;
use crate::to_storage_err;

pub fn search_vector(
    conn: &Connection,
    query_vector: &[f32],
    limit: usize,
    filter: &SearchFilter,
) -> CortexResult<Vec<(String, f64)>> {
    let content_type = filter.content_type.map(|ct| ct.as_str());
    let mut stmt = conn
        .prepare(
            "SELECT mv.entry_id, mv.vector, mv.dimension, m.keywords
             FROM memory_vec mv
             JOIN memory m ON m.id = mv.entry_id
             WHERE (?1 IS NULL OR m.content_type = ?1)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![content_type], |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            let keywords_json: String = row.get(3)?;
            Ok((id, blob, dims as usize, keywords_json))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let query_norm_sq: f64 = query_vector.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }

    let mut scored: Vec<(String, f64)> = Vec::new();
    for row in rows {
        let (id, blob, dims, keywords_json) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims != query_vector.len() {
            return Err(StorageError::DimensionMismatch {
                expected: query_vector.len(),
                actual: dims,
            }
            .into());
        }
        if !filter.keywords.is_empty() {
            let keywords: std::collections::BTreeSet<String> =
                serde_json::from_str(&keywords_json).map_err(|e| to_storage_err(e.to_string()))?;
            if !filter.keywords.iter().any(|k| keywords.contains(&k.to_lowercase())) {
                continue;
            }
        }
        let stored = bytes_to_f32_vec(&blob);
        let sim = cosine_similarity(query_vector, &stored);
        scored.push((id, sim));
    }

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;
    use crate::queries::memory_crud::insert_memory;
    use cortex_core::memory::{ContentType, MemoryEntry};

    #[test]
    fn finds_closest_vector() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let e1 = MemoryEntry::new("a", ContentType::Code, []);
        let e2 = MemoryEntry::new("b", ContentType::Code, []);
        insert_memory(&conn, &e1, Some(&[1.0, 0.0, 0.0])).unwrap();
        insert_memory(&conn, &e2, Some(&[0.0, 1.0, 0.0])).unwrap();

        let results = search_vector(&conn, &[1.0, 0.0, 0.0], 10, &SearchFilter::default()).unwrap();
        assert_eq!(results[0].0, e1.id);
    }

    #[test]
    fn mismatched_dimension_is_integrity_violation() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let e1 = MemoryEntry::new("a", ContentType::Code, []);
        insert_memory(&conn, &e1, Some(&[1.0, 0.0, 0.0])).unwrap();

        let err = search_vector(&conn, &[1.0, 0.0], 10, &SearchFilter::default()).unwrap_err();
        assert_eq!(err.kind(), cortex_core::ErrorKind::IntegrityViolation);
    }
}
