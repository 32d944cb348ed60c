//! Generic model (de)serialization layer
//!
//! Every model in [`crate::resources`] is a typed record of one JSON object
//! shape, and all of them convert to and from the wire through the same
//! small set of parts defined here:
//!
//! - [`Field`] - the three-state optional cell (unset / null / set)
//! - [`FromWire`] and [`WireObject`] - field-by-field decoding with
//!   `MissingField`/`TypeMismatch` errors naming the exact field path
//! - [`ToWire`] - encoding into an ordered JSON document via serde
//! - [`ExtraFields`] - opaque preservation of server-added fields
//! - `wire_enum!` - generation of forward-compatible open string enums
//!
//! The layer is entirely synchronous and side-effect free: models are value
//! types, every operation either reads or returns a new value, and nothing
//! here blocks, retries, or touches I/O.

pub(crate) mod decode;
mod encode;
pub(crate) mod enums;
mod extra;
mod field;

pub use decode::{FromWire, WireObject};
pub use encode::ToWire;
pub use extra::ExtraFields;
pub use field::Field;

pub(crate) use enums::wire_enum;
