//! Encoding typed models into generic JSON values
//!
//! The encode direction is driven entirely by serde derives on the models:
//! field order follows declaration order, unset optionals are skipped via
//! `skip_serializing_if`, renamed fields carry their wire names, and nested
//! models recurse naturally. [`ToWire`] is a thin blanket adapter that turns
//! any serializable model into an ordered [`Value`] document.

use serde::Serialize;
use serde_json::Value;

use crate::types::WireError;

/// A type that can be encoded into a generic JSON value
pub trait ToWire: Serialize {
    /// Encode `self` into an ordered JSON value
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Serialize`] if the underlying serializer fails.
    fn to_wire(&self) -> Result<Value, WireError> {
        serde_json::to_value(self).map_err(WireError::serialize)
    }
}

impl<T: Serialize> ToWire for T {}
