//! CLI `query` command — run a pair query locally and print the JSON envelope.

use anyhow::{Context, Result};

use robokop_pairs::config::RobokopConfig;
use robokop_pairs::pairs::request::clamp_limit;
use robokop_pairs::pairs::{query_pairs, Pagination, QueryRequest};

/// Split a `key=value` argument.
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))
}

pub fn query(
    config: &RobokopConfig,
    filters: Vec<(String, String)>,
    sort: Vec<(String, String)>,
    limit: i64,
    offset: i64,
) -> Result<()> {
    anyhow::ensure!(limit >= 1, "limit must be at least 1");
    anyhow::ensure!(offset >= 0, "offset must not be negative");

    let request = QueryRequest {
        sort,
        filters,
        pagination: Pagination {
            limit: clamp_limit(limit, config.pairs.max_limit),
            offset,
        },
    };

    let conn = robokop_pairs::db::open_database(config.resolved_db_path())?;
    let result = query_pairs(&conn, &request).context("pair query failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    eprintln!(
        "{} of {} matching pairs (offset {}).",
        result.rows.len(),
        result.num_of_results,
        result.offset
    );

    Ok(())
}
