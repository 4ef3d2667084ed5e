pub mod migrations;
pub mod schema;

use anyhow::{Context, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;

/// Open (or create) the pairs database at the given path with schema initialized
/// and migrations applied.
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database at {}", path.display()))?;

    // WAL lets readers keep their snapshot while a bulk load commits
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(conn)
}

/// Initialize the database at `path`, then build a pool of up to `max_size`
/// connections to it for concurrent reads.
pub fn open_read_pool(
    path: impl AsRef<Path>,
    max_size: u32,
) -> Result<Pool<SqliteConnectionManager>> {
    let path = path.as_ref();
    drop(open_database(path)?);

    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn| conn.pragma_update(None, "busy_timeout", 5000));
    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .build(manager)
        .with_context(|| format!("failed to build connection pool for {}", path.display()))?;

    // Verify a pooled connection sees the schema
    let conn = pool.get()?;
    conn.query_row("SELECT COUNT(*) FROM drug_disease_pairs", [], |row| row.get::<_, i64>(0))?;

    tracing::info!(path = %path.display(), max_size, "read pool ready");
    Ok(pool)
}

/// Open an in-memory database with schema and migrations applied.
pub fn open_memory_database() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    schema::init_schema(&conn).context("failed to initialize schema")?;
    migrations::run_migrations(&conn).context("failed to run migrations")?;
    Ok(conn)
}

/// Result of [`check_database_health`].
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub schema_version: u32,
    pub integrity_ok: bool,
    pub integrity_details: String,
    pub pair_count: u64,
    pub loaded_at: Option<String>,
}

/// Run `PRAGMA integrity_check` and collect basic row counts.
pub fn check_database_health(conn: &Connection) -> Result<HealthReport> {
    let schema_version = migrations::get_schema_version(conn)?;

    let integrity_details: String =
        conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    let integrity_ok = integrity_details == "ok";

    let pair_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM drug_disease_pairs", [], |row| row.get(0))?;

    let loaded_at = get_meta(conn, schema::META_LOADED_AT)?;

    Ok(HealthReport {
        schema_version,
        integrity_ok,
        integrity_details,
        pair_count: pair_count as u64,
        loaded_at,
    })
}

/// Read a value from `schema_meta`.
pub fn get_meta(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
}

/// Insert or replace a value in `schema_meta`.
pub fn set_meta(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_meta (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}
