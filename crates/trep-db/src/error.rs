//! Database error types.

use thiserror::Error;

/// Errors that can occur during reverse-lookup database operations.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database not initialized - run create_tables first")]
    NotInitialized,

    #[error("schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: i32, found: i32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type for `trep-db` operations.
pub type Result<T> = std::result::Result<T, DbError>;
