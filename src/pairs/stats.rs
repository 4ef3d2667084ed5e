use crate::error::Result;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{get_meta, schema};

/// Summary of the loaded pair table.
#[derive(Debug, Serialize)]
pub struct PairStats {
    pub total_pairs: u64,
    pub known_pairs: u64,
    pub predicted_pairs: u64,
    pub distinct_drugs: u64,
    pub distinct_diseases: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Compute table statistics in a single pass plus provenance lookups.
pub fn pair_stats(conn: &Connection) -> Result<PairStats> {
    let (total, known, drugs, diseases, min_score, max_score) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(known), 0), COUNT(DISTINCT drug_id), \
         COUNT(DISTINCT disease_id), MIN(score), MAX(score) FROM drug_disease_pairs",
        [],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, Option<f64>>(5)?,
            ))
        },
    )?;

    Ok(PairStats {
        total_pairs: total as u64,
        known_pairs: known as u64,
        predicted_pairs: (total - known) as u64,
        distinct_drugs: drugs as u64,
        distinct_diseases: diseases as u64,
        min_score,
        max_score,
        loaded_at: get_meta(conn, schema::META_LOADED_AT)?,
        source: get_meta(conn, schema::META_SOURCE)?,
    })
}
