//! Drug-disease association query service for the ROBOKOP knowledge-graph explorer.
//!
//! The service owns a single SQLite table of scored drug-disease pairs (curated
//! "known" associations plus model predictions) and answers filtered, sorted and
//! paginated queries over it.
//!
//! # Architecture
//!
//! - **Storage**: SQLite (WAL mode) holding the `drug_disease_pairs` table. The only
//!   writer is an offline bulk load that replaces the whole table in one transaction.
//! - **Query**: an allow-listed clause builder turns caller filters/sorts into a
//!   parameterized `WHERE` / `ORDER BY` / `LIMIT` set; the query service runs a row
//!   fetch and a count inside one read transaction.
//! - **Transport**: a small axum HTTP API plus a CLI for loading and ad-hoc queries.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, migrations, and health checks
//! - [`error`] — The [`PairsError`](error::PairsError) type shared by the query path
//! - [`pairs`] — Clause building, querying, bulk loading and statistics
//! - [`server`] — HTTP routes and boundary validation

pub mod config;
pub mod db;
pub mod error;
pub mod pairs;
pub mod server;
