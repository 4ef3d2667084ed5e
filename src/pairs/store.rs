//! Reads and the bulk replace against the `drug_disease_pairs` table.

use rusqlite::{params, params_from_iter, Connection, Row};

use crate::pairs::clauses::QueryClauses;
use crate::pairs::types::AssociationRecord;

const SELECT_COLUMNS: &str = "drug_name, drug_id, disease_name, disease_id, score, known";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AssociationRecord> {
    Ok(AssociationRecord {
        drug_name: row.get(0)?,
        drug_id: row.get(1)?,
        disease_name: row.get(2)?,
        disease_id: row.get(3)?,
        score: row.get(4)?,
        known: row.get(5)?,
    })
}

/// Fetch one page of rows: WHERE + ORDER BY + LIMIT/OFFSET.
pub fn fetch_rows(
    conn: &Connection,
    clauses: &QueryClauses,
) -> rusqlite::Result<Vec<AssociationRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM drug_disease_pairs {} {} {}",
        clauses.where_sql(),
        clauses.order_sql(),
        clauses.limit_sql()
    );
    tracing::debug!(sql = %sql, "fetching pair rows");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(clauses.params()), record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Count rows matching the WHERE clause, ignoring sort and pagination.
pub fn count_rows(conn: &Connection, clauses: &QueryClauses) -> rusqlite::Result<u64> {
    let sql = format!(
        "SELECT COUNT(*) FROM drug_disease_pairs {}",
        clauses.where_sql()
    );
    let count: i64 =
        conn.query_row(&sql, params_from_iter(clauses.filter_params()), |row| row.get(0))?;
    Ok(count as u64)
}

/// Every stored record, highest score first.
pub fn all_rows(conn: &Connection) -> rusqlite::Result<Vec<AssociationRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM drug_disease_pairs ORDER BY score DESC, rowid"
    ))?;
    let rows = stmt
        .query_map([], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Delete every row and insert `records` in order. Runs on the caller's
/// connection; wrap in a transaction for atomic replacement.
pub fn replace_all(conn: &Connection, records: &[AssociationRecord]) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM drug_disease_pairs", [])?;

    let mut stmt = conn.prepare(
        "INSERT INTO drug_disease_pairs (drug_name, drug_id, disease_name, disease_id, score, known) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for record in records {
        stmt.execute(params![
            record.drug_name,
            record.drug_id,
            record.disease_name,
            record.disease_id,
            record.score,
            record.known,
        ])?;
    }
    Ok(records.len())
}
