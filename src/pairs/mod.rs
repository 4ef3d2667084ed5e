pub mod clauses;
pub mod load;
pub mod query;
pub mod request;
pub mod stats;
pub mod store;
pub mod types;

pub use crate::error::{PairsError, Result};
pub use query::{query_pairs, PairQueryService};
pub use types::{AssociationRecord, Pagination, QueryRequest, QueryResult, SortDirection};
