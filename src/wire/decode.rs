//! Decoding from generic JSON values into typed models
//!
//! This module is the deserialization half of the model contract. Each model
//! implements [`FromWire`] by draining a [`WireObject`] field by field; the
//! sequence of `required`/`optional` calls is the model's field descriptor
//! table, and the leftover keys become the model's preserved unknown fields.
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Decoding Rules
//!
//! - A required field absent from the object is a [`WireError::MissingField`].
//! - A field whose JSON type doesn't match is a [`WireError::TypeMismatch`],
//!   reported with the full dotted path to the field.
//! - An optional field decodes to [`Field::Unset`] when absent and
//!   [`Field::Null`] when explicitly null.
//! - Keys outside the known field set are never rejected; they are handed
//!   back by [`WireObject::into_extra`] for opaque round-tripping.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::types::WireError;
use crate::wire::extra::ExtraFields;
use crate::wire::field::Field;

/// A type that can be decoded from a generic JSON value
pub trait FromWire: Sized {
    /// Decode `value` into `Self`
    ///
    /// # Errors
    ///
    /// Returns a [`WireError`] naming the offending field when the value's
    /// shape doesn't match the type's wire contract.
    fn from_wire(value: Value) -> Result<Self, WireError>;
}

/// The JSON type name of a value, for TypeMismatch messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl FromWire for String {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(WireError::type_mismatch("string", json_type_name(&other))),
        }
    }
}

impl FromWire for bool {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(WireError::type_mismatch("boolean", json_type_name(&other))),
        }
    }
}

impl FromWire for i64 {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Number(ref n) => n.as_i64().ok_or_else(|| {
                WireError::type_mismatch("integer", "non-integral number")
            }),
            other => Err(WireError::type_mismatch("integer", json_type_name(&other))),
        }
    }
}

impl FromWire for DateTime<Utc> {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| WireError::type_mismatch("ISO 8601 timestamp", "string")),
            other => Err(WireError::type_mismatch(
                "ISO 8601 timestamp",
                json_type_name(&other),
            )),
        }
    }
}

impl FromWire for NaiveDate {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::String(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| WireError::type_mismatch("ISO 8601 date", "string")),
            other => Err(WireError::type_mismatch(
                "ISO 8601 date",
                json_type_name(&other),
            )),
        }
    }
}

impl<T: FromWire> FromWire for Option<T> {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_wire(other).map(Some),
        }
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| T::from_wire(item).map_err(|e| e.at_index(index)))
                .collect(),
            other => Err(WireError::type_mismatch("array", json_type_name(&other))),
        }
    }
}

impl FromWire for Value {
    fn from_wire(value: Value) -> Result<Self, WireError> {
        Ok(value)
    }
}

/// One JSON object mid-decode
///
/// Wraps the object's key-value map and hands fields out one at a time.
/// Fields are removed as they are read so that whatever remains at the end
/// is exactly the set of keys this SDK version doesn't know about.
#[derive(Debug)]
pub struct WireObject {
    fields: Map<String, Value>,
}

impl WireObject {
    /// Begin decoding a JSON value that must be an object
    ///
    /// # Errors
    ///
    /// Returns a TypeMismatch (expected object) for any other JSON type.
    pub fn new(value: Value) -> Result<Self, WireError> {
        match value {
            Value::Object(fields) => Ok(WireObject { fields }),
            other => Err(WireError::type_mismatch("object", json_type_name(&other))),
        }
    }

    /// Decode a required field
    ///
    /// Required-but-nullable fields are read as `required::<Option<T>>`,
    /// which maps an explicit null to `None`.
    ///
    /// # Errors
    ///
    /// Returns MissingField if the key is absent, or the field's decode
    /// error with `key` prepended to its path.
    pub fn required<T: FromWire>(&mut self, key: &str) -> Result<T, WireError> {
        let value = self
            .fields
            .remove(key)
            .ok_or_else(|| WireError::missing_field(key))?;
        T::from_wire(value).map_err(|e| e.at(key))
    }

    /// Decode an optional field into its three-state form
    ///
    /// Absent keys yield `Field::Unset`, explicit nulls `Field::Null`, and
    /// values `Field::Set`.
    ///
    /// # Errors
    ///
    /// Returns the field's decode error with `key` prepended to its path.
    pub fn optional<T: FromWire>(&mut self, key: &str) -> Result<Field<T>, WireError> {
        match self.fields.remove(key) {
            None => Ok(Field::Unset),
            Some(Value::Null) => Ok(Field::Null),
            Some(value) => T::from_wire(value)
                .map(Field::Set)
                .map_err(|e| e.at(key)),
        }
    }

    /// Whether a key is still present (not yet drained)
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Finish decoding, preserving all unread keys verbatim
    pub fn into_extra(self) -> ExtraFields {
        ExtraFields::from(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_present() {
        let mut obj = WireObject::new(json!({"id": "abc"})).unwrap();
        let id: String = obj.required("id").unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn test_required_missing_is_an_error() {
        let mut obj = WireObject::new(json!({})).unwrap();
        let err = obj.required::<String>("id").unwrap_err();
        assert_eq!(err, WireError::missing_field("id"));
    }

    #[test]
    fn test_required_wrong_type_names_the_field() {
        let mut obj = WireObject::new(json!({"amount": "five"})).unwrap();
        let err = obj.required::<i64>("amount").unwrap_err();
        assert_eq!(
            err,
            WireError::TypeMismatch {
                field: "amount".to_string(),
                expected: "integer",
                found: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_required_nullable_maps_null_to_none() {
        let mut obj = WireObject::new(json!({"completed_at": null})).unwrap();
        let completed: Option<String> = obj.required("completed_at").unwrap();
        assert_eq!(completed, None);
    }

    #[test]
    fn test_optional_three_states() {
        let mut obj = WireObject::new(json!({"null_field": null, "set_field": 5})).unwrap();
        assert_eq!(obj.optional::<i64>("absent_field").unwrap(), Field::Unset);
        assert_eq!(obj.optional::<i64>("null_field").unwrap(), Field::Null);
        assert_eq!(obj.optional::<i64>("set_field").unwrap(), Field::Set(5));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = WireObject::new(json!([1, 2])).unwrap_err();
        assert_eq!(err, WireError::type_mismatch("object", "array"));
    }

    #[test]
    fn test_unknown_keys_survive_as_extra() {
        let mut obj =
            WireObject::new(json!({"id": "abc", "added_in_v2": {"x": 1}})).unwrap();
        let _: String = obj.required("id").unwrap();
        let extra = obj.into_extra();
        assert_eq!(extra.get("added_in_v2"), Some(&json!({"x": 1})));
    }

    #[test]
    fn test_vec_reports_element_index() {
        let err = Vec::<i64>::from_wire(json!([1, "two", 3])).unwrap_err();
        assert_eq!(err.field(), Some("[1]"));
    }

    #[test]
    fn test_timestamp_parses_rfc3339() {
        let ts = DateTime::<Utc>::from_wire(json!("2024-06-01T12:30:00Z")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-01T12:30:00+00:00");
    }

    #[test]
    fn test_malformed_timestamp_is_a_type_mismatch() {
        let err = DateTime::<Utc>::from_wire(json!("yesterday")).unwrap_err();
        assert_eq!(
            err,
            WireError::type_mismatch("ISO 8601 timestamp", "string")
        );
    }

    #[test]
    fn test_date_parses_iso_8601() {
        let date = NaiveDate::from_wire(json!("1986-11-02")).unwrap();
        assert_eq!(date.to_string(), "1986-11-02");
    }
}
