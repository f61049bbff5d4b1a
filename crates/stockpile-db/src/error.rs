//! # Database Error Types
//!
//! Error types for storage-layer operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  DbError (this module) ← storage failure, categorized               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  GatewayError::Storage ← what gateway callers see                   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Collaborator surfaces a user-facing message                        │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are surfaced to the caller as an operation failure and
//! never retried automatically.

use thiserror::Error;

/// Storage-layer operation errors.
///
/// These wrap sqlx errors and categorize them for callers. Constraint
/// violations (the table's NOT NULL columns) report as `QueryFailed` with
/// the SQLite message intact.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database file could not be opened or created.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Disk full
    /// - Read-only handle pointed at a missing file
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Migration version conflict
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Statement execution failed.
    ///
    /// ## When This Occurs
    /// - Constraint violation (NOT NULL columns)
    /// - Malformed caller-supplied filter or sort fragment
    /// - I/O error mid-statement
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database     → DbError::QueryFailed (message kept)
/// sqlx::Error::PoolTimedOut → DbError::PoolExhausted
/// sqlx::Error::PoolClosed   → DbError::ConnectionFailed
/// Other                     → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage-layer operations.
pub type DbResult<T> = Result<T, DbError>;
