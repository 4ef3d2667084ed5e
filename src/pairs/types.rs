//! Record and request types for the drug-disease pair table.
//!
//! [`AssociationRecord`] mirrors one `drug_disease_pairs` row. [`QueryRequest`] and
//! [`QueryResult`] are the ephemeral request/response envelopes of a pair query.

use serde::{Deserialize, Serialize};

/// One known or predicted drug-disease association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub drug_name: String,
    /// Compact identifier, e.g. `CHEBI:15365`.
    pub drug_id: String,
    pub disease_name: String,
    /// Compact identifier, e.g. `MONDO:0005148`.
    pub disease_id: String,
    pub score: f64,
    /// `true` for curated associations, `false` for model predictions.
    pub known: bool,
}

/// Sort direction for an `ORDER BY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    /// Only the exact lowercase spellings are honored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("unknown sort direction: {s}")),
        }
    }
}

/// Page window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

/// A filter/sort/paginate request over the pair table.
///
/// `sort` and `filters` are kept as ordered `(key, value)` lists exactly as the
/// caller supplied them; unknown keys are dropped later by the clause builder.
/// The first accepted sort key is the primary ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub sort: Vec<(String, String)>,
    pub filters: Vec<(String, String)>,
    pub pagination: Pagination,
}

impl QueryRequest {
    /// An unfiltered, unsorted request for one page.
    pub fn page(limit: i64, offset: i64) -> Self {
        Self {
            sort: Vec::new(),
            filters: Vec::new(),
            pagination: Pagination { limit, offset },
        }
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort.push((key.into(), direction.into()));
        self
    }
}

/// One page of matching records plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub rows: Vec<AssociationRecord>,
    /// Rows matching the filters, ignoring sort and pagination.
    pub num_of_results: u64,
    pub limit: i64,
    pub offset: i64,
}
