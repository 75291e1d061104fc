//! Errors surfaced by a `TodoService` implementation.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the HTTP layer maps it to 404
//! while every other failure becomes a 500. Callers match on the variant;
//! the message text is for logs only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// None of the referenced todos exist.
    #[error("todo not found: {ids:?}")]
    NotFound { ids: Vec<i64> },

    /// The service refused input that would break a storage invariant.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(id: i64) -> Self {
        ServiceError::NotFound { ids: vec![id] }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}
