//! Error types for the wire (de)serialization layer
//!
//! This module defines the errors that can occur while decoding API payloads
//! into models or encoding models back into JSON. Errors are designed to be
//! descriptive: a failed decode names the offending field (as a dotted path
//! into the document) and what went wrong, to aid debugging against API
//! contract drift.
//!
//! # Error Categories
//!
//! - **MissingField**: a required field was absent from the payload
//! - **TypeMismatch**: a field held a JSON value of the wrong type or shape
//! - **Serialize**: a model could not be converted into a JSON value
//!
//! Two conditions are deliberately *not* errors, per the API's
//! forward-compatibility guarantees: enum values outside the known case set
//! (preserved as raw strings) and object keys outside the known field set
//! (preserved opaquely on the model).

use thiserror::Error;

/// Main error type for wire encoding and decoding
///
/// Decode errors carry a `field` path that is extended as the error bubbles
/// out of nested objects and lists, so the final message points at the exact
/// location in the document (e.g. `source.card_decline.amount`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// A required field was absent from the payload
    #[error("missing required field `{field}`")]
    MissingField {
        /// Dotted path to the missing field
        field: String,
    },

    /// A field held a JSON value of the wrong type
    ///
    /// Also covers unparseable timestamp/date strings and decode targets
    /// that were not JSON objects.
    #[error(
        "type mismatch{}: expected {expected}, found {found}",
        if field.is_empty() { String::new() } else { format!(" for field `{}`", field) }
    )]
    TypeMismatch {
        /// Dotted path to the mismatched field (empty at the document root)
        field: String,
        /// The JSON type or shape the field requires
        expected: &'static str,
        /// The JSON type that was actually present
        found: String,
    },

    /// A model could not be serialized into a JSON value
    #[error("serialization failed: {message}")]
    Serialize {
        /// Description of the serialization failure
        message: String,
    },
}

// Helper functions for creating common errors

impl WireError {
    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        WireError::MissingField {
            field: field.into(),
        }
    }

    /// Create a TypeMismatch error with no field path yet
    ///
    /// The path is filled in by [`WireError::at`] / [`WireError::at_index`]
    /// as the error propagates out of the value being decoded.
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        WireError::TypeMismatch {
            field: String::new(),
            expected,
            found: found.into(),
        }
    }

    /// Create a Serialize error from a serde_json failure
    pub fn serialize(error: serde_json::Error) -> Self {
        WireError::Serialize {
            message: error.to_string(),
        }
    }

    /// Prepend an object key to the error's field path
    ///
    /// Produces `key`, `key.rest`, or `key[2].rest` depending on the path
    /// accumulated so far. Serialize errors are returned unchanged.
    pub fn at(self, key: &str) -> Self {
        self.map_field(|field| {
            if field.is_empty() {
                key.to_string()
            } else if field.starts_with('[') {
                format!("{}{}", key, field)
            } else {
                format!("{}.{}", key, field)
            }
        })
    }

    /// Prepend a list index to the error's field path
    pub fn at_index(self, index: usize) -> Self {
        self.map_field(|field| {
            if field.is_empty() {
                format!("[{}]", index)
            } else if field.starts_with('[') {
                format!("[{}]{}", index, field)
            } else {
                format!("[{}].{}", index, field)
            }
        })
    }

    /// The dotted path to the field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            WireError::MissingField { field } => Some(field),
            WireError::TypeMismatch { field, .. } => Some(field),
            WireError::Serialize { .. } => None,
        }
    }

    fn map_field(self, rewrite: impl FnOnce(&str) -> String) -> Self {
        match self {
            WireError::MissingField { field } => WireError::MissingField {
                field: rewrite(&field),
            },
            WireError::TypeMismatch {
                field,
                expected,
                found,
            } => WireError::TypeMismatch {
                field: rewrite(&field),
                expected,
                found,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = WireError::missing_field("amount");
        assert_eq!(err.to_string(), "missing required field `amount`");
    }

    #[test]
    fn test_type_mismatch_display_with_field() {
        let err = WireError::type_mismatch("integer", "string").at("amount");
        assert_eq!(
            err.to_string(),
            "type mismatch for field `amount`: expected integer, found string"
        );
    }

    #[test]
    fn test_type_mismatch_display_at_document_root() {
        let err = WireError::type_mismatch("object", "array");
        assert_eq!(
            err.to_string(),
            "type mismatch: expected object, found array"
        );
    }

    #[test]
    fn test_at_builds_dotted_path() {
        let err = WireError::missing_field("amount")
            .at("card_decline")
            .at("source");
        assert_eq!(err.field(), Some("source.card_decline.amount"));
    }

    #[test]
    fn test_at_index_attaches_to_parent_key_without_dot() {
        let err = WireError::type_mismatch("string", "null")
            .at("id")
            .at_index(2)
            .at("elements");
        assert_eq!(err.field(), Some("elements[2].id"));
    }

    #[test]
    fn test_at_leaves_serialize_errors_unchanged() {
        let err = WireError::Serialize {
            message: "boom".to_string(),
        };
        let err = err.at("anything");
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "serialization failed: boom");
    }
}
