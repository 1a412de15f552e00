//! Error types for attribute setup.
//!
//! Per-point access never fails; these errors only surface while binding
//! proxies, loading settings or creating attributes.

use crate::types::ValueKind;
use thiserror::Error;

/// Main error type for attrkit operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Attribute missing from the store on the requested side
    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    /// Point property name not recognized
    #[error("Unknown point property: {0}")]
    PropertyNotFound(String),

    /// Kind name not recognized
    #[error("Unknown value kind: {0}")]
    UnknownKind(String),

    /// Selector text could not be parsed
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Stored kind differs from the one required
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: ValueKind, actual: ValueKind },

    /// Kind cannot be split into per-field proxies
    #[error("Cannot break {0} down into individual fields")]
    UnsupportedBreakdown(ValueKind),

    /// Write requested on a read-only target
    #[error("Target is read-only: {0}")]
    ReadOnly(String),

    /// Settings failed validation
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid selector error.
    pub fn invalid(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelector { selector: selector.into(), reason: reason.into() }
    }
}

/// Result type alias for attrkit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::TypeMismatch { expected: ValueKind::Vector3, actual: ValueKind::String };
        assert!(e.to_string().contains("Vector3"));
        assert!(e.to_string().contains("String"));

        let e = Error::UnsupportedBreakdown(ValueKind::Name);
        assert!(e.to_string().contains("Name"));

        let e = Error::invalid("$Nope", "unknown property");
        assert!(e.to_string().contains("$Nope"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
