//! Schema creation and idempotent trigger installation.
//!
//! (I5) There must be exactly one lexical-sync trigger and one
//! vector-cascade trigger per operation/table pair. The source this
//! implementation is built from once duplicated these triggers across
//! re-runs; the fix is to `DROP TRIGGER IF EXISTS` immediately before every
//! `CREATE TRIGGER`, so re-running this module is always safe.

use rusqlite::Connection;

use cortex_core::errors::CortexResult;

use crate::to_storage_err;

const CURRENT_SCHEMA_VERSION: u32 = 1;

pub fn run_migrations(conn: &Connection) -> CortexResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let applied: u32 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    if applied < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .map_err(|e| to_storage_err(e.to_string()))?;
    } else {
        // Already at or past v1: triggers may have been installed by an
        // older, buggy migration. Re-assert them idempotently regardless.
        install_triggers(conn)?;
    }

    let _ = CURRENT_SCHEMA_VERSION;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> CortexResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS memory (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            content_type TEXT NOT NULL,
            keywords TEXT NOT NULL,
            created_at TEXT NOT NULL,
            source_tool TEXT,
            file_path TEXT
        );

        CREATE VIRTUAL TABLE IF NOT EXISTS memory_fts USING fts5(
            content, keywords, content='memory', content_rowid='rowid'
        );

        CREATE TABLE IF NOT EXISTS memory_vec (
            entry_id TEXT PRIMARY KEY REFERENCES memory(id) ON DELETE CASCADE,
            vector BLOB NOT NULL,
            dimension INTEGER NOT NULL,
            model_id TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_memory_created_at ON memory(created_at);
        CREATE INDEX IF NOT EXISTS idx_memory_content_type ON memory(content_type);
        ",
    )
    .map_err(|e| to_storage_err(format!("migration v1: {e}")))?;

    install_triggers(conn)?;
    Ok(())
}

fn install_triggers(conn: &Connection) -> CortexResult<()> {
    conn.execute_batch(
        "
        DROP TRIGGER IF EXISTS memory_ai;
        CREATE TRIGGER memory_ai AFTER INSERT ON memory BEGIN
            INSERT INTO memory_fts(rowid, content, keywords)
            VALUES (new.rowid, new.content, new.keywords);
        END;

        DROP TRIGGER IF EXISTS memory_ad;
        CREATE TRIGGER memory_ad AFTER DELETE ON memory BEGIN
            INSERT INTO memory_fts(memory_fts, rowid, content, keywords)
            VALUES('delete', old.rowid, old.content, old.keywords);
            DELETE FROM memory_vec WHERE entry_id = old.id;
        END;
        ",
    )
    .map_err(|e| to_storage_err(format!("trigger install: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_count(conn: &Connection, name: &str) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='trigger' AND name=?1",
            [name],
            |r| r.get(0),
        )
        .unwrap()
    }

    #[test]
    fn running_migrations_twice_never_duplicates_triggers() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(trigger_count(&conn, "memory_ai"), 1);
        assert_eq!(trigger_count(&conn, "memory_ad"), 1);
    }

    #[test]
    fn creates_expected_tables() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        for table in ["memory", "memory_fts", "memory_vec", "schema_version"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE name = ?1",
                    [table],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }
}
