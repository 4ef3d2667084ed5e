#![allow(dead_code)]

use robokop_pairs::db;
use robokop_pairs::pairs::load::load_pairs;
use robokop_pairs::pairs::AssociationRecord;
use rusqlite::Connection;

/// Open a fresh in-memory database with schema and migrations applied.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::schema::init_schema(&conn).unwrap();
    db::migrations::run_migrations(&conn).unwrap();
    conn
}

pub fn pair(drug: &str, drug_id: &str, disease: &str, disease_id: &str, score: f64, known: bool) -> AssociationRecord {
    AssociationRecord {
        drug_name: drug.to_string(),
        drug_id: drug_id.to_string(),
        disease_name: disease.to_string(),
        disease_id: disease_id.to_string(),
        score,
        known,
    }
}

/// A small mixed dataset: 8 pairs, 3 aspirin-family drugs, 2 known.
pub fn sample_pairs() -> Vec<AssociationRecord> {
    vec![
        pair("Aspirin", "CHEBI:15365", "Headache", "MONDO:0005277", 0.91, true),
        pair("Aspirin", "CHEBI:15365", "Myocardial infarction", "MONDO:0005068", 0.84, false),
        pair("Aspirin lysine", "CHEBI:31228", "Pain", "MONDO:0021668", 0.77, false),
        pair("Metformin", "CHEBI:6801", "Type 2 diabetes mellitus", "MONDO:0005148", 0.97, true),
        pair("Metformin", "CHEBI:6801", "Polycystic ovary syndrome", "MONDO:0008487", 0.66, false),
        pair("Ibuprofen", "CHEBI:5855", "Pain", "MONDO:0021668", 0.72, false),
        pair("Carbaspirin calcium", "CHEBI:3395", "Fever", "MONDO:0001997", 0.58, false),
        pair("Sildenafil", "CHEBI:9139", "Pulmonary hypertension", "MONDO:0005149", 0.61, false),
    ]
}

/// Seed `records` through the bulk-load path.
pub fn seed(conn: &mut Connection, records: &[AssociationRecord]) {
    load_pairs(conn, records, "test-fixture").unwrap();
}

/// `count` synthetic pairs with distinct drugs and descending scores.
pub fn synthetic_pairs(count: usize) -> Vec<AssociationRecord> {
    (0..count)
        .map(|i| {
            pair(
                &format!("Drug {i:03}"),
                &format!("CHEBI:{}", 10_000 + i),
                "Disease",
                "MONDO:0000001",
                1.0 - (i as f64) / 1000.0,
                i % 5 == 0,
            )
        })
        .collect()
}
