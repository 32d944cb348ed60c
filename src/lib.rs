//! Rust Banking SDK Model Layer
//! # Overview
//!
//! This library provides the typed models for a banking platform's REST API:
//! entities, card payments, card disputes, declined transactions, pending
//! transactions, real-time decisions, and transactions.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`wire`] - The generic (de)serialization layer every model shares:
//!   - [`wire::Field`] - three-state optional fields (unset / null / set)
//!   - [`wire::FromWire`] / [`wire::WireObject`] - decoding with precise,
//!     field-addressed errors
//!   - [`wire::ToWire`] - encoding into ordered JSON documents
//!   - [`wire::ExtraFields`] - opaque round-tripping of server-added fields
//! - [`types`] - The error surface ([`types::WireError`])
//! - [`resources`] - One module per API resource, instantiating the wire
//!   layer's pattern for each JSON shape
//!
//! # Conventions
//!
//! Models are plain values: everything is `Clone`, nothing is mutated in
//! place, and `with_*` updaters return new instances. Required fields are
//! constructor parameters; optional fields start unset and are omitted from
//! wire output until set (an explicit null is a distinct, serialized
//! state). Enum fields accept either their symbolic cases or raw wire
//! strings, and values the server adds later - enum cases, object fields,
//! union categories - are preserved rather than rejected.

// Module declarations
pub mod resources;
pub mod types;
pub mod wire;

pub use types::WireError;
pub use wire::{ExtraFields, Field, FromWire, ToWire, WireObject};
