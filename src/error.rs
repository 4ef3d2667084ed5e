use thiserror::Error;

/// Errors raised by the pair query path.
#[derive(Error, Debug)]
pub enum PairsError {
    /// The request was rejected before touching the store.
    #[error("invalid request: {0}")]
    Validation(String),

    /// SQLite failed to prepare or execute a statement.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No pooled connection could be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// The blocking query task panicked or was cancelled.
    #[error("query task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, PairsError>;
