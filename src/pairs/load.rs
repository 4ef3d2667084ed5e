//! Offline bulk load — the only writer of `drug_disease_pairs`.
//!
//! The source dataset is a JSON object keyed by record id. Records scoring below
//! the configured threshold are dropped, the rest are written in descending score
//! order, replacing the whole table in a single transaction.

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::db::{schema, set_meta};
use crate::pairs::store::replace_all;
use crate::pairs::types::AssociationRecord;

/// Outcome of [`load_pairs`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub source: String,
    pub loaded: usize,
    pub loaded_at: String,
}

/// Parse the keyed dataset. Record ids are not stored.
pub fn parse_dataset(json: &str) -> Result<Vec<AssociationRecord>> {
    let keyed: BTreeMap<String, AssociationRecord> =
        serde_json::from_str(json).context("failed to parse dataset JSON")?;
    Ok(keyed.into_values().collect())
}

/// Render records in the keyed dataset format accepted by [`parse_dataset`].
pub fn render_dataset(records: &[AssociationRecord]) -> Result<String> {
    let width = records.len().to_string().len();
    let keyed: BTreeMap<String, &AssociationRecord> = records
        .iter()
        .enumerate()
        .map(|(i, record)| (format!("{:0width$}", i, width = width), record))
        .collect();
    serde_json::to_string_pretty(&keyed).context("failed to serialize dataset")
}

/// Keep finite scores `>= min_score`, highest score first.
pub fn select_for_load(
    records: Vec<AssociationRecord>,
    min_score: f64,
) -> Vec<AssociationRecord> {
    let mut selected: Vec<AssociationRecord> = records
        .into_iter()
        .filter(|r| r.score.is_finite() && r.score >= min_score)
        .collect();
    selected.sort_by(|a, b| b.score.total_cmp(&a.score));
    selected
}

/// Replace the table contents with `records` and record provenance.
///
/// Delete, inserts and metadata commit together. Readers on other connections
/// (WAL mode) keep seeing the previous contents until the commit.
pub fn load_pairs(
    conn: &mut Connection,
    records: &[AssociationRecord],
    source: &str,
) -> Result<LoadSummary> {
    let loaded_at = chrono::Utc::now().to_rfc3339();

    let tx = conn.transaction()?;
    let loaded = replace_all(&tx, records).context("failed to write pairs")?;
    set_meta(&tx, schema::META_LOADED_AT, &loaded_at)?;
    set_meta(&tx, schema::META_SOURCE, source)?;
    set_meta(&tx, schema::META_ROW_COUNT, &loaded.to_string())?;
    tx.commit()?;

    tracing::info!(source = %source, loaded, "drug-disease pairs loaded");

    Ok(LoadSummary {
        source: source.to_string(),
        loaded,
        loaded_at,
    })
}
