//! Cross-cutting error types for Civic Desk.
//!
//! Storage errors (`DatabaseError`) live in `civic-db`; configuration errors
//! in `civic-config`. A unified error is deferred to `civic-cli` where all
//! crate errors converge through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Civic crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (dates, enum names, paired list lengths).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is explicitly refused.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
