//! Validation error types

use thiserror::Error;

/// Result type for payload validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A payload did not have the shape its schema requires.
///
/// Raised before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The payload was not a JSON object
    #[error("Payload must be a JSON object")]
    NotAnObject,

    /// A field was present but not usable as its declared type
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// A stored field was explicitly set to null
    #[error("Field '{0}' may be omitted but not set to null")]
    NullField(String),

    /// An email-shaped field did not look like an email address
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),

    /// Anything else serde rejected (missing fields, wrong types)
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl ValidationError {
    pub fn invalid_field(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
