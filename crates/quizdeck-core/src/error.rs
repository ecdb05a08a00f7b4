//! Quiz load error types.
//!
//! All variants are user-input errors: the player corrects the document and
//! resubmits. There is no retry logic and no partial recovery.

use thiserror::Error;

/// Errors produced when loading a quiz document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The trimmed input was zero-length.
    #[error("input is empty; paste a quiz JSON document")]
    Empty,

    /// The input is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    ParseFailure(String),

    /// The JSON parsed but does not describe a usable quiz.
    #[error("invalid quiz document: {0}")]
    SchemaViolation(String),
}

impl LoadError {
    /// Returns `true` when the document was syntactically valid JSON but
    /// structurally unusable.
    pub fn is_schema_violation(&self) -> bool {
        matches!(self, LoadError::SchemaViolation(_))
    }
}
