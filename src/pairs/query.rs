//! Pair query service — clause building, row fetch, count, envelope.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::{PairsError, Result};
use crate::pairs::clauses::build_clauses;
use crate::pairs::store::{count_rows, fetch_rows};
use crate::pairs::types::{QueryRequest, QueryResult};

/// Run a validated request against the store.
///
/// The row fetch and the count run inside one read transaction so both observe
/// the same snapshot. Either both succeed or the whole call fails.
pub fn query_pairs(conn: &Connection, request: &QueryRequest) -> Result<QueryResult> {
    let pagination = request.pagination;
    if pagination.limit < 1 {
        return Err(PairsError::Validation("limit must be at least 1".into()));
    }
    if pagination.offset < 0 {
        return Err(PairsError::Validation("offset must not be negative".into()));
    }

    let clauses = build_clauses(request);

    let tx = conn.unchecked_transaction()?;
    let rows = fetch_rows(&tx, &clauses)?;
    let num_of_results = count_rows(&tx, &clauses)?;
    tx.commit()?;

    tracing::debug!(
        returned = rows.len(),
        num_of_results,
        limit = pagination.limit,
        offset = pagination.offset,
        "pair query complete"
    );

    Ok(QueryResult {
        rows,
        num_of_results,
        limit: pagination.limit,
        offset: pagination.offset,
    })
}

/// Async front for [`query_pairs`] over a pool of read connections.
///
/// The pool is opened once at startup and injected here. Each call checks out its
/// own connection on the blocking pool, so concurrent calls only contend inside
/// SQLite (WAL readers do not block each other).
#[derive(Clone)]
pub struct PairQueryService {
    pool: Pool<SqliteConnectionManager>,
}

impl PairQueryService {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Self {
        Self { pool }
    }

    pub async fn query(&self, request: QueryRequest) -> Result<QueryResult> {
        self.with_conn(move |conn| query_pairs(conn, &request)).await
    }

    /// Run `f` with a pooled connection on the blocking pool.
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await
        .map_err(|e| PairsError::Task(e.to_string()))?
    }
}
