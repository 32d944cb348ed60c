//! Three-state optional field cell
//!
//! JSON object fields in this API have three distinct presence states:
//! absent from the document, present with an explicit null, and present with
//! a value. [`Field`] models all three so they survive a round trip, which a
//! plain `Option` cannot do (it collapses absent and null).
//!
//! # Serialization
//!
//! `Field` serializes `Null` as JSON null and `Set(v)` as `v`. The unset
//! state is expressed at the struct level:
//!
//! ```ignore
//! #[serde(skip_serializing_if = "Field::is_unset")]
//! pub note: Field<String>,
//! ```
//!
//! so an unset field never appears as a key in the output, while an
//! explicitly-null field is emitted as null.

use serde::{Serialize, Serializer};

/// An optional field that distinguishes unset from explicitly null
///
/// `Unset` fields are omitted from wire output entirely; `Null` fields are
/// emitted as JSON null; `Set` fields are emitted as their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// The field was never given a value and is absent from the wire
    #[default]
    Unset,

    /// The field is present and explicitly null
    Null,

    /// The field is present with a value
    Set(T),
}

impl<T> Field<T> {
    /// Whether the field is unset (absent from the wire)
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    /// Whether the field is present and explicitly null
    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// Whether the field holds a value
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    /// A reference to the value, if one is set
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }

    /// The value, if one is set, collapsing unset and null to `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the field as `Field<&T>`
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Set(value) => Field::Set(value),
        }
    }

    /// Apply a function to the set value, preserving unset and null states
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Set(value) => Field::Set(f(value)),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Set(value)
    }
}

impl From<&str> for Field<String> {
    fn from(value: &str) -> Self {
        Field::Set(value.to_string())
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Unset is skipped at the struct level; serializing it directly
            // degrades to null rather than producing an invalid document.
            Field::Unset | Field::Null => serializer.serialize_none(),
            Field::Set(value) => value.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        let field: Field<String> = Field::default();
        assert!(field.is_unset());
        assert!(!field.is_null());
        assert!(!field.is_set());
    }

    #[test]
    fn test_from_value_sets() {
        let field: Field<i64> = 500.into();
        assert_eq!(field, Field::Set(500));
        assert_eq!(field.value(), Some(&500));
    }

    #[test]
    fn test_from_str_sets_string() {
        let field: Field<String> = "note".into();
        assert_eq!(field.value().map(String::as_str), Some("note"));
    }

    #[test]
    fn test_into_option_collapses_unset_and_null() {
        assert_eq!(Field::<i64>::Unset.into_option(), None);
        assert_eq!(Field::<i64>::Null.into_option(), None);
        assert_eq!(Field::Set(7).into_option(), Some(7));
    }

    #[test]
    fn test_map_preserves_state() {
        assert_eq!(Field::<i64>::Unset.map(|v| v + 1), Field::Unset);
        assert_eq!(Field::<i64>::Null.map(|v| v + 1), Field::Null);
        assert_eq!(Field::Set(1).map(|v| v + 1), Field::Set(2));
    }

    #[test]
    fn test_null_serializes_as_json_null() {
        let json = serde_json::to_value(Field::<String>::Null).unwrap();
        assert!(json.is_null());
    }

    #[test]
    fn test_set_serializes_as_value() {
        let json = serde_json::to_value(Field::Set("abc".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("abc"));
    }
}
