//! Error types for schema construction and submission validation

use crate::domain::FieldKind;
use thiserror::Error;

/// Errors raised while declaring fields. A failed declaration registers nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Field declared without a name
    #[error("{kind} field declared without a name")]
    MissingName { kind: FieldKind },

    /// Radio or select field declared without its list of values
    #[error("{kind} field '{field}' requires a list of values")]
    MissingValues { field: String, kind: FieldKind },

    /// Validation pattern does not compile
    #[error("Invalid validation pattern for field '{field}': {reason}")]
    InvalidPattern { field: String, reason: String },

    /// Validation pattern declared on a non-text field
    #[error("Validation patterns apply to text fields only, '{field}' is a {kind} field")]
    UnsupportedPattern { field: String, kind: FieldKind },
}

/// A single problem found in a submitted form
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{message}")]
    Required { field: String, message: String },

    #[error("Value '{value}' is not a valid choice for field '{field}'")]
    UnknownChoice { field: String, value: String },

    #[error("Field '{field}' accepts a single value, got {count}")]
    TooManyValues { field: String, count: usize },

    #[error("Value for field '{field}' does not match pattern '{pattern}'")]
    Pattern { field: String, pattern: String },
}

impl SubmissionError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::UnknownChoice { field, .. }
            | Self::TooManyValues { field, .. }
            | Self::Pattern { field, .. } => field,
        }
    }
}
