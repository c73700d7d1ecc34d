//! Database error types for civic-db.

use civic_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Validation, transition, lookup, or refusal raised before any write.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the failure came from the backing store rather than the caller's input.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        !matches!(self, Self::Core(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_are_not_storage_failures() {
        let err: DatabaseError = CoreError::Validation("bad date".into()).into();
        assert!(!err.is_storage());
        assert_eq!(err.to_string(), "Validation error: bad date");
    }

    #[test]
    fn query_errors_are_storage_failures() {
        assert!(DatabaseError::Query("boom".into()).is_storage());
        assert!(DatabaseError::NoResult.is_storage());
    }
}
