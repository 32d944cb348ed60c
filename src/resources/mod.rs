//! Generated-style models for each API resource
//!
//! One module per resource, each mirroring the JSON shapes the API
//! exchanges: response resources (decoded with
//! [`FromWire`](crate::wire::FromWire), all fields public), request
//! parameter objects (required-args constructors plus non-mutating `with_*`
//! updaters), and open enums. Shapes shared between resources (currency,
//! route types, the card lifecycle details) are defined once and reused.

pub mod card_payments;
pub mod declined_transactions;
pub mod disputes;
pub mod entities;
pub mod pending_transactions;
pub mod real_time_decisions;
pub mod shared;
pub mod transactions;
