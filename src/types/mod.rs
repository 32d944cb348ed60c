//! Core types shared across the SDK
//!
//! This module re-exports the error surface of the wire layer. Domain
//! enums and models live under [`crate::resources`]; the generic
//! (de)serialization machinery lives under [`crate::wire`].

mod error;

pub use error::WireError;
