//! Boundary validation for caller-supplied query bodies.
//!
//! Turns the JSON body of a pair query into a [`QueryRequest`], rejecting bad
//! pagination and clamping `limit` to the configured maximum. `sort` and `filters`
//! keep the key order of the JSON object; entries whose value is not a string are
//! dropped here, and unknown keys are left for the clause builder to ignore.

use serde_json::{Map, Value};

use crate::error::{PairsError, Result};
use crate::pairs::types::{Pagination, QueryRequest};

/// Validate a JSON query body.
pub fn parse_query_body(body: &Value, max_limit: u32) -> Result<QueryRequest> {
    let body = body
        .as_object()
        .ok_or_else(|| PairsError::Validation("request body must be a JSON object".into()))?;

    let pagination = body
        .get("pagination")
        .filter(|v| !v.is_null())
        .ok_or_else(|| PairsError::Validation("pagination is required".into()))?;
    let pagination = parse_pagination(pagination, max_limit)?;

    Ok(QueryRequest {
        sort: string_entries(body.get("sort"), "sort")?,
        filters: string_entries(body.get("filters"), "filters")?,
        pagination,
    })
}

fn parse_pagination(value: &Value, max_limit: u32) -> Result<Pagination> {
    let object = value
        .as_object()
        .ok_or_else(|| PairsError::Validation("pagination must be an object".into()))?;

    let limit = integer_field(object, "limit")?;
    let offset = integer_field(object, "offset")?;

    if limit < 1 {
        return Err(PairsError::Validation("limit must be at least 1".into()));
    }
    if offset < 0 {
        return Err(PairsError::Validation("offset must not be negative".into()));
    }

    Ok(Pagination {
        limit: clamp_limit(limit, max_limit),
        offset,
    })
}

/// Clamp a positive page size to `max_limit`.
pub fn clamp_limit(limit: i64, max_limit: u32) -> i64 {
    limit.min(i64::from(max_limit.max(1)))
}

fn integer_field(object: &Map<String, Value>, field: &str) -> Result<i64> {
    match object.get(field) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            // Integers past i64::MAX saturate; the limit clamp and OFFSET absorb them.
            if n.as_u64().is_some() {
                return Ok(i64::MAX);
            }
            match n.as_f64() {
                // `as` saturates out-of-range floats
                Some(f) if f.fract() == 0.0 => Ok(f as i64),
                _ => Err(PairsError::Validation(format!("{field} must be an integer"))),
            }
        }
        Some(_) => Err(PairsError::Validation(format!("{field} must be an integer"))),
        None => Err(PairsError::Validation(format!("pagination.{field} is required"))),
    }
}

fn string_entries(value: Option<&Value>, name: &str) -> Result<Vec<(String, String)>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()),
        Some(_) => Err(PairsError::Validation(format!("{name} must be an object"))),
    }
}
