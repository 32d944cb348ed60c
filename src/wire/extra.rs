//! Opaque storage for fields this SDK version doesn't know about
//!
//! The API adds fields to existing resources over time. Payload keys outside
//! a model's known field set are captured here verbatim during decoding and
//! flattened back into the object during encoding, so newer payloads round
//! trip through older SDK versions without data loss.

use serde::Serialize;
use serde_json::{Map, Value};

/// Unrecognized fields of one wire object, preserved verbatim
///
/// Every response model carries one of these under `#[serde(flatten)]`.
/// An empty set flattens to nothing, so models decoded from payloads with
/// no unknown keys serialize without a trace of this field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ExtraFields {
    fields: Map<String, Value>,
}

impl ExtraFields {
    /// An empty set of extra fields
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any unrecognized fields were captured
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of unrecognized fields captured
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The preserved value of an unrecognized field, if present
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Iterate over the preserved fields in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl From<Map<String, Value>> for ExtraFields {
    fn from(fields: Map<String, Value>) -> Self {
        ExtraFields { fields }
    }
}

impl IntoIterator for ExtraFields {
    type Item = (String, Value);
    type IntoIter = <Map<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_by_default() {
        let extra = ExtraFields::new();
        assert!(extra.is_empty());
        assert_eq!(extra.len(), 0);
    }

    #[test]
    fn test_preserves_values_verbatim() {
        let mut map = Map::new();
        map.insert("added_later".to_string(), json!({"nested": [1, 2]}));
        let extra = ExtraFields::from(map);
        assert_eq!(extra.get("added_later"), Some(&json!({"nested": [1, 2]})));
    }

    #[test]
    fn test_serializes_as_bare_map() {
        let mut map = Map::new();
        map.insert("k".to_string(), json!(1));
        let extra = ExtraFields::from(map);
        assert_eq!(serde_json::to_value(&extra).unwrap(), json!({"k": 1}));
    }
}
