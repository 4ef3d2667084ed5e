//! SQL DDL for the pairs database.
//!
//! Defines the `drug_disease_pairs` table and the `schema_meta` key/value table.
//! All DDL uses `IF NOT EXISTS` for idempotent initialization.

use rusqlite::Connection;

/// `schema_meta` key holding the RFC 3339 time of the last bulk load.
pub const META_LOADED_AT: &str = "loaded_at";
/// `schema_meta` key holding the file path or URL of the last bulk load.
pub const META_SOURCE: &str = "source";
/// `schema_meta` key holding the row count written by the last bulk load.
pub const META_ROW_COUNT: &str = "row_count";

const SCHEMA_SQL: &str = r#"
-- Scored drug-disease associations (curated and predicted)
CREATE TABLE IF NOT EXISTS drug_disease_pairs (
    drug_name TEXT NOT NULL,
    drug_id TEXT NOT NULL,
    disease_name TEXT NOT NULL,
    disease_id TEXT NOT NULL,
    score REAL NOT NULL,
    known BOOLEAN NOT NULL CHECK (known IN (0, 1))
);

-- Schema metadata and load provenance
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
