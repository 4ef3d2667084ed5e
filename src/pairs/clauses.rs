//! Allow-listed SQL clause builder for pair queries.
//!
//! Caller-supplied column names never reach the query text directly: each key is
//! matched against [`FilterColumn`] or [`SortColumn`], and only the `&'static str`
//! column name of a recognized variant is written into SQL. Filter values and the
//! page window are always bound as parameters. Unknown keys or directions are
//! dropped without error.

use rusqlite::types::ToSqlOutput;
use rusqlite::ToSql;

use crate::pairs::types::{QueryRequest, SortDirection};

/// Columns that may be substring-filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    DrugName,
    DrugId,
    DiseaseName,
    DiseaseId,
}

impl FilterColumn {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "drug_name" => Some(Self::DrugName),
            "drug_id" => Some(Self::DrugId),
            "disease_name" => Some(Self::DiseaseName),
            "disease_id" => Some(Self::DiseaseId),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::DrugName => "drug_name",
            Self::DrugId => "drug_id",
            Self::DiseaseName => "disease_name",
            Self::DiseaseId => "disease_id",
        }
    }
}

/// Columns that may appear in `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    DrugName,
    DiseaseName,
    Score,
    Known,
}

impl SortColumn {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "drug_name" => Some(Self::DrugName),
            "disease_name" => Some(Self::DiseaseName),
            "score" => Some(Self::Score),
            "known" => Some(Self::Known),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::DrugName => "drug_name",
            Self::DiseaseName => "disease_name",
            Self::Score => "score",
            Self::Known => "known",
        }
    }
}

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Self::Text(s) => s.to_sql(),
            Self::Integer(i) => i.to_sql(),
        }
    }
}

/// Structured clause set produced by [`build_clauses`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryClauses {
    /// Accepted filters with their `%value%` patterns, in request order.
    pub filters: Vec<(FilterColumn, String)>,
    /// Accepted sort keys, primary first.
    pub order: Vec<(SortColumn, SortDirection)>,
    pub limit: i64,
    pub offset: i64,
}

/// Translate a request into allow-listed clauses. Never fails.
pub fn build_clauses(request: &QueryRequest) -> QueryClauses {
    let mut filters: Vec<(FilterColumn, String)> = Vec::new();
    for (key, value) in &request.filters {
        match FilterColumn::from_key(key) {
            Some(column) if !filters.iter().any(|(c, _)| *c == column) => {
                filters.push((column, format!("%{value}%")));
            }
            Some(_) => {}
            None => tracing::debug!(key = %key, "ignoring unknown filter key"),
        }
    }

    let mut order: Vec<(SortColumn, SortDirection)> = Vec::new();
    for (key, direction) in &request.sort {
        let Some(column) = SortColumn::from_key(key) else {
            tracing::debug!(key = %key, "ignoring unknown sort key");
            continue;
        };
        let Ok(direction) = direction.parse::<SortDirection>() else {
            tracing::debug!(key = %key, direction = %direction, "ignoring unknown sort direction");
            continue;
        };
        if !order.iter().any(|(c, _)| *c == column) {
            order.push((column, direction));
        }
    }

    QueryClauses {
        filters,
        order,
        limit: request.pagination.limit,
        offset: request.pagination.offset,
    }
}

impl QueryClauses {
    /// `WHERE a LIKE ?1 AND b LIKE ?2`, or empty when no filter was accepted.
    pub fn where_sql(&self) -> String {
        if self.filters.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .filters
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} LIKE ?{}", column.column(), i + 1))
            .collect();
        format!("WHERE {}", conditions.join(" AND "))
    }

    /// `ORDER BY a DESC, b ASC`, or empty when no sort key was accepted.
    pub fn order_sql(&self) -> String {
        if self.order.is_empty() {
            return String::new();
        }
        let keys: Vec<String> = self
            .order
            .iter()
            .map(|(column, direction)| format!("{} {}", column.column(), direction.as_sql()))
            .collect();
        format!("ORDER BY {}", keys.join(", "))
    }

    /// `LIMIT ?n OFFSET ?m`, numbered after the filter placeholders.
    pub fn limit_sql(&self) -> String {
        let next = self.filters.len() + 1;
        format!("LIMIT ?{} OFFSET ?{}", next, next + 1)
    }

    /// Parameters for [`where_sql`](Self::where_sql) alone (used by the count query).
    pub fn filter_params(&self) -> Vec<SqlParam> {
        self.filters
            .iter()
            .map(|(_, pattern)| SqlParam::Text(pattern.clone()))
            .collect()
    }

    /// Filter parameters followed by limit and offset.
    pub fn params(&self) -> Vec<SqlParam> {
        let mut params = self.filter_params();
        params.push(SqlParam::Integer(self.limit));
        params.push(SqlParam::Integer(self.offset));
        params
    }
}
